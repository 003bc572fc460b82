use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tract_onnx::pb;
use tract_onnx::prelude::Framework;
use tract_onnx::pb::tensor_shape_proto::dimension;
use tract_onnx::pb::type_proto;

/// Information about a declared graph input or output
#[derive(Default, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TensorInfo {
    pub name: String,
    /// Shape of the tensor, `-1` for symbolic or unknown dimensions
    pub shape: Vec<i64>,
    pub dtype: String,
}

#[derive(Default, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OpsetInfo {
    pub domain: String,
    pub version: i64,
}

/// ONNX model metadata, read from the protobuf without building a runnable plan
#[derive(Default, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ModelMetadata {
    pub producer: Option<String>,
    pub producer_version: Option<String>,
    pub ir_version: i64,
    pub opsets: Vec<OpsetInfo>,
    pub graph_name: Option<String>,
    pub num_nodes: usize,
    pub num_initializers: usize,
    pub inputs: Vec<TensorInfo>,
    pub outputs: Vec<TensorInfo>,
}

impl ModelMetadata {
    pub fn read(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(LoadError::NotFound(path.to_path_buf()));
        }
        let proto = tract_onnx::onnx()
            .proto_model_for_path(path)
            .map_err(|e| LoadError::Invalid {
                path: path.to_path_buf(),
                message: format!("{e:#}"),
            })?;
        Ok(Self::from_proto(&proto))
    }

    pub fn from_proto(proto: &pb::ModelProto) -> Self {
        let graph = proto.graph.as_ref();
        Self {
            producer: non_empty(&proto.producer_name),
            producer_version: non_empty(&proto.producer_version),
            ir_version: proto.ir_version,
            opsets: proto
                .opset_import
                .iter()
                .map(|o| OpsetInfo {
                    domain: if o.domain.is_empty() {
                        "ai.onnx".to_string()
                    } else {
                        o.domain.clone()
                    },
                    version: o.version,
                })
                .collect(),
            graph_name: graph.and_then(|g| non_empty(&g.name)),
            num_nodes: graph.map(|g| g.node.len()).unwrap_or_default(),
            num_initializers: graph.map(|g| g.initializer.len()).unwrap_or_default(),
            inputs: graph
                .map(|g| declared_tensors(&g.input, &g.initializer))
                .unwrap_or_default(),
            outputs: graph
                .map(|g| declared_tensors(&g.output, &[]))
                .unwrap_or_default(),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

// Older exporters list initializers as graph inputs too; skip those.
fn declared_tensors(values: &[pb::ValueInfoProto], initializers: &[pb::TensorProto]) -> Vec<TensorInfo> {
    values
        .iter()
        .filter(|v| !initializers.iter().any(|i| i.name == v.name))
        .map(tensor_info)
        .collect()
}

fn tensor_info(value: &pb::ValueInfoProto) -> TensorInfo {
    let tensor = value.r#type.as_ref().and_then(|t| match &t.value {
        Some(type_proto::Value::TensorType(tensor)) => Some(tensor),
        _ => None,
    });

    let shape = tensor
        .and_then(|t| t.shape.as_ref())
        .map(|s| {
            s.dim
                .iter()
                .map(|d| match d.value {
                    Some(dimension::Value::DimValue(v)) => v,
                    _ => -1,
                })
                .collect()
        })
        .unwrap_or_default();

    TensorInfo {
        name: value.name.clone(),
        shape,
        dtype: tensor
            .map(|t| elem_type_name(t.elem_type).to_string())
            .unwrap_or_else(|| "unknown".to_string()),
    }
}

fn elem_type_name(code: i32) -> &'static str {
    match code {
        1 => "float32",
        2 => "uint8",
        3 => "int8",
        6 => "int32",
        7 => "int64",
        9 => "bool",
        10 => "float16",
        11 => "float64",
        _ => "other",
    }
}
