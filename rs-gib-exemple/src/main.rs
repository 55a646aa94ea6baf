use rs_gib_core::io::{build_output_path, load_detector, read_lines, save_snapshot};
use rs_gib_core::{Detector, GibberishError};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Log level is taken from RUST_LOG (for example RUST_LOG=rs_gib_core=debug)
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // One entry per line, blank lines are skipped
    let corpus = read_lines("./data/corpus.txt")?;
    let good = read_lines("./data/good.txt")?;
    let bad = read_lines("./data/bad.txt")?;

    // Start from the default alphabet (a-z and the blank)
    let mut detector = Detector::unconfigured();

    // Every transition count starts at this value before the corpus is read
    detector.set_smoothing(10.0)?;

    // Attempting an invalid smoothing value
    match detector.set_smoothing(0.0) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("{}", e),
    }

    // Build the transition matrix and calibrate the threshold
    detector.train(&corpus, &good, &bad)?;

    // Training with labels that overlap is reported instead of accepted
    match detector.train(&corpus, &bad, &good) {
        Ok(_) => println!("Should not happen"),
        Err(e @ GibberishError::IndistinguishableClasses { .. }) => println!("{}", e),
        Err(e) => return Err(e.into()),
    }

    // Verbose evaluation: verdict, score and threshold
    for text in ["John Smith", "kjdjksdf", "The weather is nice today", "xzqwv plkj", "a"] {
        let verdict = detector.evaluate(text)?;
        println!(
            "{:<28} gibberish: {:<5} score: {:.5} threshold: {:.5}",
            text, verdict.is_gibberish, verdict.score, verdict.threshold
        );
    }

    // Input made only of characters outside the alphabet cannot be scored
    match detector.evaluate("1234 !!") {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("{}", e),
    }

    // Save the model next to the corpus (data/corpus.json) and reload it
    let model_path = build_output_path("./data/corpus.txt", "json")?;
    save_snapshot(&model_path, &detector.export()?)?;
    tracing::info!("Model saved to {}", model_path.display());
    let reloaded = load_detector(&model_path)?;
    println!("Reloaded model from {}: {}", model_path.display(), reloaded.is_gibberish("hello world")?);

    // The bundled model gives the same answers without training
    let bundled = Detector::new()?;
    for text in ["hello world", "asdfghjkl"] {
        println!("Bundled model, {:?} is gibberish: {}", text, bundled.is_gibberish(text)?);
    }

    Ok(())
}
