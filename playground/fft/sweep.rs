use deblur::{degrade::degrade_image, metrics::psnr, restore, Method};
use plotters::style::{BLUE, RED};

use crate::{
    plot::{plot_sweep, Curve},
    util::{self, output_name, BoxError},
};

const BLUR_STD_DEV: f32 = 2.0;
const SNR: f32 = 100.0;

pub fn run(file_name: &str) -> Result<(), BoxError> {
    let image = util::read_gray(file_name)?;
    let degraded = degrade_image(&image, BLUR_STD_DEV, SNR, 0)?;

    let score = |method: Method| -> Result<(f32, f32), BoxError> {
        let restored = restore(&degraded.image, &degraded.kernel, method)?;
        let parameter = match method {
            Method::Inverse { eps } => eps,
            Method::Wiener { snr } => snr,
        };
        Ok((parameter, psnr(&image, &restored)?))
    };

    // eps from 1e-3 to 1, snr from 1 to 1e4
    let inverse = (0..=12)
        .map(|i| score(Method::Inverse { eps: 10f32.powf(-3.0 + i as f32 / 4.0) }))
        .collect::<Result<Vec<_>, _>>()?;
    let wiener = (0..=16)
        .map(|i| score(Method::Wiener { snr: 10f32.powf(i as f32 / 4.0) }))
        .collect::<Result<Vec<_>, _>>()?;

    for (parameter, db) in inverse.iter().chain(wiener.iter()) {
        println!("{parameter:>10.4}: {db:.2} dB");
    }

    plot_sweep(
        &output_name(file_name, "sweep-inverse"),
        "thresholded inverse filter",
        "eps",
        &[Curve {
            label: "inverse",
            points: inverse,
            color: RED,
        }],
    )?;

    plot_sweep(
        &output_name(file_name, "sweep-wiener"),
        &format!("wiener filter (degraded with snr {SNR})"),
        "snr",
        &[Curve {
            label: "wiener",
            points: wiener,
            color: BLUE,
        }],
    )?;

    Ok(())
}
