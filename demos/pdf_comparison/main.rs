use std::time::Instant;

use pdfmc::MonteCarloIntegrator;

const SAMPLE_COUNTS: [usize; 3] = [100, 10_000, 1_000_000];

fn f(x: f64) -> f64 {
    5. * x.powi(4)
}

fn run<P: Fn(f64) -> f64>(name: &str, pdf: P) {
    println!("\n{}", name);

    let mut mc = MonteCarloIntegrator::new(f, pdf);
    for &samples in &SAMPLE_COUNTS {
        let start = Instant::now();
        match mc.estimate(samples) {
            Ok(e) => println!(
                "{:>10} Samples \tEstimate: {:<10.6} \tVariance: {:<10.6}\tDuration: {:>8}us",
                samples,
                e.mean,
                e.variance,
                start.elapsed().as_micros()
            ),
            Err(e) => println!("{:>10} Samples \tFailed: {}", samples, e),
        }
    }
}

fn main() {
    println!("Monte Carlo Sampling");
    println!("------------------------");

    run("Constant PDF", |_| 1.);
    run("Linear PDF", |x| 2. * x);
    run("Quadratic PDF", |x| 3. * x * x);
    run("Bad PDF", |x| -2. * x + 2.);
    run("Perfect PDF", f);

    #[cfg(feature = "plotting")]
    pdfmc::plot::plot_densities(&f, &|x: f64| -2. * x + 2., "bad_pdf.svg").unwrap();
}
