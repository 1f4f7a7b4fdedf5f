// News classification — trait-based abstraction for swappable backends.
//
// The NewsClassifier trait defines the interface. KeywordClassifier implements
// it with a fixed phrase heuristic; OnnxSentimentClassifier delegates to a
// pretrained sentiment model and remaps its labels. Exactly one backend is
// built at startup and shared read-only by every request.

pub mod download;
pub mod keywords;
pub mod onnx;
pub mod traits;
