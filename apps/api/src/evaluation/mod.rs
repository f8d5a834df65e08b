// Resume evaluation: upload validation, text extraction, heuristic scoring.
// Extraction runs on the blocking pool; scoring is a pure function of the text.

pub mod extract;
pub mod feedback;
pub mod handlers;
pub mod scoring;
pub mod upload;
