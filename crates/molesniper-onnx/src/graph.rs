use molesniper_training::Perceptron;

use crate::wire::MessageWriter;

/// IR version stamped on exported models.
pub const IR_VERSION: u64 = 7;
/// Default-domain opset version the graph targets.
pub const OPSET_VERSION: u64 = 11;
/// Name of the single graph input tensor.
pub const INPUT_NAME: &str = "input";
/// Name of the single graph output tensor.
pub const OUTPUT_NAME: &str = "output";
/// Symbolic name of the dynamic batch dimension.
pub const BATCH_DIM: &str = "batch_size";

const PRODUCER_NAME: &str = "molesniper";
const GRAPH_NAME: &str = "mole_sniper";

/// `TensorProto.DataType.FLOAT`.
const FLOAT: u64 = 1;

// Field numbers from onnx.proto, for the subset of messages the fixed
// graph shape uses.
const MODEL_IR_VERSION: u32 = 1;
const MODEL_PRODUCER_NAME: u32 = 2;
const MODEL_GRAPH: u32 = 7;
const MODEL_OPSET_IMPORT: u32 = 8;

const OPSET_VERSION_FIELD: u32 = 2;

const GRAPH_NODE: u32 = 1;
const GRAPH_NAME_FIELD: u32 = 2;
const GRAPH_INITIALIZER: u32 = 5;
const GRAPH_INPUT: u32 = 11;
const GRAPH_OUTPUT: u32 = 12;

const NODE_INPUT: u32 = 1;
const NODE_OUTPUT: u32 = 2;
const NODE_OP_TYPE: u32 = 4;

const TENSOR_DIMS: u32 = 1;
const TENSOR_DATA_TYPE: u32 = 2;
const TENSOR_NAME: u32 = 8;
const TENSOR_RAW_DATA: u32 = 9;

const VALUE_INFO_NAME: u32 = 1;
const VALUE_INFO_TYPE: u32 = 2;
const TYPE_TENSOR: u32 = 1;
const TENSOR_TYPE_ELEM: u32 = 1;
const TENSOR_TYPE_SHAPE: u32 = 2;
const SHAPE_DIM: u32 = 1;
const DIM_VALUE: u32 = 1;
const DIM_PARAM: u32 = 3;

/// One dimension of a tensor shape: concrete or symbolic.
enum Dim<'a> {
    Value(usize),
    Param(&'a str),
}

/// Serializes the perceptron as a complete ONNX `ModelProto`.
///
/// The graph is `MatMul -> Add -> Relu -> MatMul -> Add` over the
/// perceptron's weight buffers, with a dynamic batch dimension on both the
/// input and output tensors.
#[must_use]
pub fn to_onnx_bytes(model: &Perceptron) -> Vec<u8> {
    let mut root = MessageWriter::new();
    root.uint(MODEL_IR_VERSION, IR_VERSION);
    root.string(MODEL_PRODUCER_NAME, PRODUCER_NAME);
    root.message(MODEL_GRAPH, |graph| {
        node(graph, "MatMul", &[INPUT_NAME, "w1"], "matmul1_out");
        node(graph, "Add", &["matmul1_out", "b1"], "add1_out");
        node(graph, "Relu", &["add1_out"], "relu_out");
        node(graph, "MatMul", &["relu_out", "w2"], "matmul2_out");
        node(graph, "Add", &["matmul2_out", "b2"], OUTPUT_NAME);
        graph.string(GRAPH_NAME_FIELD, GRAPH_NAME);
        initializer(
            graph,
            "w1",
            &[model.input_len(), model.hidden_len()],
            model.w1(),
        );
        initializer(graph, "b1", &[model.hidden_len()], model.b1());
        initializer(
            graph,
            "w2",
            &[model.hidden_len(), model.output_len()],
            model.w2(),
        );
        initializer(graph, "b2", &[model.output_len()], model.b2());
        value_info(
            graph,
            GRAPH_INPUT,
            INPUT_NAME,
            &[Dim::Param(BATCH_DIM), Dim::Value(model.input_len())],
        );
        value_info(
            graph,
            GRAPH_OUTPUT,
            OUTPUT_NAME,
            &[Dim::Param(BATCH_DIM), Dim::Value(model.output_len())],
        );
    });
    root.message(MODEL_OPSET_IMPORT, |opset| {
        opset.uint(OPSET_VERSION_FIELD, OPSET_VERSION);
    });
    root.into_bytes()
}

fn node(graph: &mut MessageWriter, op_type: &str, inputs: &[&str], output: &str) {
    graph.message(GRAPH_NODE, |n| {
        for input in inputs {
            n.string(NODE_INPUT, input);
        }
        n.string(NODE_OUTPUT, output);
        n.string(NODE_OP_TYPE, op_type);
    });
}

fn initializer(graph: &mut MessageWriter, name: &str, dims: &[usize], values: &[f32]) {
    graph.message(GRAPH_INITIALIZER, |t| {
        for &dim in dims {
            t.uint(TENSOR_DIMS, dim as u64);
        }
        t.uint(TENSOR_DATA_TYPE, FLOAT);
        t.string(TENSOR_NAME, name);
        let mut raw = Vec::with_capacity(values.len() * 4);
        for value in values {
            raw.extend_from_slice(&value.to_le_bytes());
        }
        t.bytes(TENSOR_RAW_DATA, &raw);
    });
}

fn value_info(graph: &mut MessageWriter, field: u32, name: &str, dims: &[Dim<'_>]) {
    graph.message(field, |vi| {
        vi.string(VALUE_INFO_NAME, name);
        vi.message(VALUE_INFO_TYPE, |ty| {
            ty.message(TYPE_TENSOR, |tensor| {
                tensor.uint(TENSOR_TYPE_ELEM, FLOAT);
                tensor.message(TENSOR_TYPE_SHAPE, |shape| {
                    for dim in dims {
                        shape.message(SHAPE_DIM, |d| match dim {
                            Dim::Value(value) => d.uint(DIM_VALUE, *value as u64),
                            Dim::Param(param) => d.string(DIM_PARAM, param),
                        });
                    }
                });
            });
        });
    });
}
