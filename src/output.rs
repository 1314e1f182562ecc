// Console output: turns the parsed detection response into the lines
// the demo prints. Kept separate from `api` so the formatting can be
// unit tested without a server.

use crate::api::{DetectionResponse, Prediction};

/// Render one prediction as a console line. Confidence is always shown
/// with two decimal places.
pub fn format_prediction(p: &Prediction) -> String {
    format!(
        "Object: {}, Confidence: {:.2}, Bounding Box: [{}, {}, {}, {}]",
        p.label, p.confidence, p.x_min, p.y_min, p.x_max, p.y_max
    )
}

/// Print one line per prediction, in response order, followed by the
/// server-side inference time when the server reported one.
pub fn print_predictions(resp: &DetectionResponse) {
    for prediction in &resp.predictions {
        println!("{}", format_prediction(prediction));
    }
    if let Some(ms) = resp.inference_ms {
        println!("Inference took {} ms", ms);
    }
}
