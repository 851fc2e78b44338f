//! Building blocks for `scrawled`, a handwriting-analysis service.
//!
//! A handwriting sample arrives either as an uploaded image or as strokes
//! drawn over the ink WebSocket, becomes one canonical [`EncodedImage`],
//! and is interpreted by a multimodal model into a typed
//! [`AnalysisReport`]. The model's answer is never trusted: extraction and
//! shape validation stand between its free text and the caller.

pub mod acquire;
pub mod analyzer;
pub mod args;
pub mod checkout;
pub mod encoded_image;
pub mod extract;
pub mod ink_stream;
pub mod logger;
pub mod ollama_vision;
pub mod report;
pub mod server;
pub mod session;
pub mod surface;
pub mod vision_client;

pub use acquire::{CanonicalImage, SourceKind, encode_file_bytes, from_canvas, from_file};
pub use analyzer::{Analyzer, INSTRUCTION};
pub use checkout::CheckoutClient;
pub use encoded_image::{EncodedImage, ImageSubtype};
pub use extract::extract;
pub use ink_stream::{InkEvent, InkStream};
pub use ollama_vision::OllamaVision;
pub use report::{AnalysisError, AnalysisReport, TraitScore};
pub use server::{AnalysisService, AnalyzeRequest, run_server};
pub use session::{Language, Session};
pub use surface::{DrawingSurface, Point};
pub use vision_client::VisionClient;
