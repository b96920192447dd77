mod fft;
mod plot;
mod util;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let program = args.get(1).expect("missing program name");

    let result = match program.as_str() {
        "spectrum" => fft::spectrum::run(args.get(2).expect("missing file name")),
        "sweep" => fft::sweep::run(args.get(2).expect("missing file name")),
        _ => panic!("unknown program"),
    };

    if let Err(e) = result {
        eprintln!("{program} failed: {e}");
        std::process::exit(1);
    }
}
