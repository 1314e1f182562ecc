// Entrypoint for the demo client.
// - Keeps `main` small: create an API client, run one detection, print.
// - Returns `anyhow::Result` to simplify error handling for the demo:
//   any failure is printed to stderr and the process exits non-zero.

use indicatif::{ProgressBar, ProgressStyle};
use objectdetect_cli::{api::ApiClient, output::print_predictions};
use std::path::Path;

// The demo takes no arguments: the image and threshold are fixed here,
// and the server address comes from `VISION_SERVER_URL` (defaulting to
// http://localhost:32168). See `api::ApiClient::from_env`.
const IMAGE_PATH: &str = "TestData/Objects/study-group.jpg";
const MIN_CONFIDENCE: f64 = 0.4;

fn main() -> anyhow::Result<()> {
    let api = ApiClient::from_env()?;

    // indicatif's spinner gives feedback while the request blocks; it is
    // cleared before the result lines are printed.
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message("Detecting...");

    let result = api.detect_objects(Path::new(IMAGE_PATH), Some(MIN_CONFIDENCE));
    spinner.finish_and_clear();

    let resp = result?;
    print_predictions(&resp);
    Ok(())
}
