use std::thread;

use pdfmc::{Accumulator, DensityBound, IntegratorConfig, MonteCarloIntegrator};

fn main() {
    // f integrates to 1 and the pdf peaks in the middle of the interval
    let f = |x: f64| 30. * x * x * (1. - x) * (1. - x);
    let pdf = |x: f64| 6. * x * (1. - x);

    let bounds = [
        DensityBound::UpperEndpoint,
        DensityBound::GridSupremum(1000),
        DensityBound::Explicit(1.5),
    ];

    for bound in bounds.iter() {
        let config = IntegratorConfig::rejection().with_density_bound(*bound);

        // every thread owns an independent integrator
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let config = config.clone();
                thread::spawn(move || {
                    let mut mc = MonteCarloIntegrator::with_config(f, pdf, config);
                    let mut acc = Accumulator::new();
                    mc.add_samples(250_000, &mut acc).map(|_| acc)
                })
            })
            .collect();

        let mut total = Accumulator::new();
        for h in handles {
            match h.join().unwrap() {
                Ok(acc) => total.merge(&acc),
                Err(e) => println!("{:?}: {}", bound, e),
            }
        }

        let e = total.to_estimate();
        println!(
            "{:<20} Estimate: {:.6} +- {:.6} \tVariance: {:.6} \tAcceptance: {:.3}",
            format!("{:?}", bound),
            e.mean,
            e.error(),
            e.variance,
            e.acceptance_rate()
        );
    }

    #[cfg(feature = "plotting")]
    pdfmc::plot::plot_densities(&f, &pdf, "peaked_density.svg").unwrap();
}
