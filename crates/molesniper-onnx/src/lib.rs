//! ONNX export for the trained target model.
//!
//! Serializes a [`molesniper_training::Perceptron`] as an ONNX
//! `ModelProto` byte stream so any portable inference runtime (the game
//! client uses onnxruntime-web) can evaluate it without this crate.
//!
//! The emitted graph is fixed and tiny:
//!
//! ```text
//! input [batch, N+4]
//!   -> MatMul(w1) -> Add(b1) -> Relu
//!   -> MatMul(w2) -> Add(b2)
//! output [batch, N]
//! ```
//!
//! The tensor names `input`/`output`, the five-node topology, and the
//! dynamic batch dimension are the compatibility surface consumers depend
//! on; opset 11 and IR version 7 are what the game client's runtime
//! already accepts.
//!
//! Encoding is a hand-rolled protobuf wire writer ([`wire`]) covering just
//! the handful of fields this one message shape needs — the model is pure
//! bytes out, no I/O and no external protobuf toolchain.

pub use self::graph::*;

pub(crate) mod graph;
pub(crate) mod wire;
