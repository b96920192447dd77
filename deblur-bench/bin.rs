use std::collections::BTreeMap;
use std::hint::black_box;
use std::{io, time::Instant};
use strum::IntoEnumIterator;

use deblur::{degrade::degrade_image, metrics::psnr, RealGrid};
use indicatif::ProgressBar;
use modes::FilterMode;

mod modes;
mod suite;
mod util;

use crate::suite::{generate_test_suites, ModeResult, Test, TestSuite};
use crate::util::from_png;

// how many times to run each restoration (to get the minimum time)
static RUNS: usize = 3;

// degradation applied to every image before restoring
static BLUR_STD_DEV: f32 = 2.0;
static SNR: f32 = 100.0;
static SEED: u64 = 0;

fn main() -> io::Result<()> {
    let mut suites = generate_test_suites("images");

    println!(
        " \x1b[1mRunning benchmarks\x1b[0m ({} runs per image, blur {}, snr {})",
        RUNS, BLUR_STD_DEV, SNR
    );

    for suite in suites.values_mut() {
        if suite.files.is_empty() {
            continue;
        }

        println!("┌──────────────────────────────────────────────────────┐");
        println!(
            "│ running tests for {suite_name: <34} │",
            suite_name = suite.name
        );
        println!("└──────────────────────────────────────────────────────┘");

        let pb = ProgressBar::new(suite.files.len() as u64);
        for file in suite.files.iter() {
            pb.inc(1);

            let input = std::fs::read(file)?;
            let image = match from_png(&input) {
                Ok(image) => image,
                Err(e) => {
                    pb.println(format!("Error reading {file}, skipping: {e}"));
                    continue;
                }
            };

            let (results, errored) = run_test(&image, &pb);

            suite.tests.push(Test {
                pixels: image.len(),
                name: file.to_string(),
                results,
                errored,
            });
        }
        pb.finish_and_clear()
    }

    println!("\n \x1b[1mResults\x1b[0m");

    for suite in suites.values() {
        let successfull_tests = suite
            .tests
            .iter()
            .filter(|t| !t.errored)
            .collect::<Vec<_>>();

        print_results(successfull_tests, &suite.name);
    }

    let all_tests = suites
        .values()
        .flat_map(|s| s.tests.iter())
        .filter(|t| !t.errored)
        .collect::<Vec<_>>();

    print_results(all_tests, "Overall");

    let errored = errored_names(&suites);
    if !errored.is_empty() {
        println!("\n \x1b[1mErrored\x1b[0m ({} images left out above)", errored.len());
        for name in errored {
            println!("  {name}");
        }
    }

    Ok(())
}

fn errored_names(suites: &BTreeMap<String, TestSuite>) -> Vec<&str> {
    suites
        .values()
        .flat_map(|s| s.tests.iter())
        .filter(|t| t.errored)
        .map(|t| t.name.as_str())
        .collect()
}

fn print_results(tests: Vec<&Test>, title: &str) {
    let total_pixels: usize = tests.iter().map(|t| t.pixels).sum();

    if total_pixels == 0 {
        return;
    }

    println!("┌───────────────────────────────┐");
    println!("│ {title: <29} │", title = title);
    println!("├──────────┬─────────┬──────────┤");
    println!("│ mode     │ time    │ psnr     │");
    println!("├──────────┼─────────┼──────────┤");
    for mode in FilterMode::iter() {
        let total_time: u128 = tests
            .iter()
            .filter_map(|t| t.results.get(&mode))
            .map(|r| r.min_time)
            .sum();

        // mean over images, each weighted equally
        let mean_psnr = tests
            .iter()
            .filter_map(|t| t.results.get(&mode))
            .map(|r| r.psnr as f64)
            .sum::<f64>()
            / tests.len() as f64;

        println!(
            "│ {mode: <8} │ {time: >5}ms │ {psnr: >5.2}dB │",
            mode = mode,
            time = total_time / 1000,
            psnr = mean_psnr
        );
    }
    println!("└──────────┴─────────┴──────────┘");
}

fn run_test(image: &RealGrid, pb: &ProgressBar) -> (BTreeMap<FilterMode, ModeResult>, bool) {
    let mut results: BTreeMap<FilterMode, ModeResult> = BTreeMap::new();
    let mut errored = false;

    let degraded = match degrade_image(image, BLUR_STD_DEV, SNR, SEED) {
        Ok(degraded) => degraded,
        Err(e) => {
            pb.println(format!("Error degrading image, skipping: {e}"));
            return (results, true);
        }
    };

    'outer: for mode in FilterMode::iter() {
        let mut shortest: u128 = u128::MAX;
        let mut output = RealGrid::zeros((0, 0));

        for r in 0..RUNS {
            let mut restorer = mode.get_impl(SNR);
            let start = Instant::now();

            let out = match black_box(
                restorer.restore(black_box(&degraded.image), black_box(&degraded.kernel)),
            ) {
                Err(e) => {
                    pb.println(format!("Error restoring with {mode}, skipping: {e}"));
                    errored = true;
                    continue 'outer;
                }
                Ok(out) => out,
            };

            shortest = std::cmp::min(shortest, start.elapsed().as_micros());
            if r == 0 {
                output = out;
            }
        }

        let score = match psnr(image, &output) {
            Ok(score) => score,
            Err(e) => {
                pb.println(format!("Error scoring {mode}, skipping: {e}"));
                errored = true;
                continue;
            }
        };

        results.insert(
            mode,
            ModeResult {
                min_time: shortest,
                psnr: score,
            },
        );
    }

    (results, errored)
}
