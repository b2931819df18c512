//! BERT spam model loading and forward pass

use candle_core::{DType, Device, IndexOp, Tensor};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use std::path::Path;
use textguard_core::{Error, Result};
use tokenizers::{Tokenizer, TruncationDirection};

/// Maximum sequence length fed to the encoder; longer inputs are truncated.
const MAX_SEQ_LENGTH: usize = 512;

/// Device to run inference on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceType {
    /// CPU inference (always available)
    #[default]
    Cpu,
    /// CUDA GPU inference (if available)
    Cuda(usize),
    /// Metal (Apple Silicon)
    Metal(usize),
}

impl DeviceType {
    fn create(self) -> Result<Device> {
        match self {
            Self::Cpu => Ok(Device::Cpu),
            Self::Cuda(idx) => Device::new_cuda(idx)
                .map_err(|e| Error::model_load(format!("failed to create CUDA device: {e}"))),
            Self::Metal(idx) => Device::new_metal(idx)
                .map_err(|e| Error::model_load(format!("failed to create Metal device: {e}"))),
        }
    }
}

/// A loaded binary spam classifier: BERT encoder plus a single-logit head.
///
/// This is the model handle the rest of the system works with. It is
/// immutable after loading and safe to share read-only across concurrent
/// inference calls.
pub struct BertSpamModel {
    tokenizer: Tokenizer,
    encoder: BertModel,
    head: Linear,
    device: Device,
    name: String,
}

impl std::fmt::Debug for BertSpamModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BertSpamModel")
            .field("name", &self.name)
            .field("device", &self.device)
            .finish_non_exhaustive()
    }
}

impl BertSpamModel {
    /// Load the exported artifact from a directory containing
    /// `config.json`, `tokenizer.json`, and `model.safetensors`.
    pub fn load(dir: &Path, device: DeviceType) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::model_load(format!(
                "model directory not found: {}",
                dir.display()
            )));
        }

        let device = device.create()?;

        let config_path = dir.join("config.json");
        let config: BertConfig = serde_json::from_str(
            &std::fs::read_to_string(&config_path).map_err(|e| {
                Error::model_load(format!("failed to read {}: {e}", config_path.display()))
            })?,
        )
        .map_err(|e| Error::model_load(format!("failed to parse model config: {e}")))?;

        let tokenizer_path = dir.join("tokenizer.json");
        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| Error::model_load(format!("failed to load tokenizer: {e}")))?;

        let weights_path = dir.join("model.safetensors");
        if !weights_path.is_file() {
            return Err(Error::model_load(format!(
                "model weights not found: {}",
                weights_path.display()
            )));
        }
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)
                .map_err(|e| Error::model_load(format!("failed to load weights: {e}")))?
        };

        // HF sequence-classification exports prefix encoder weights with
        // "bert"; plain encoder exports keep them at the root.
        let encoder = BertModel::load(vb.pp("bert"), &config)
            .or_else(|_| BertModel::load(vb.clone(), &config))
            .map_err(|e| Error::model_load(format!("failed to load BERT encoder: {e}")))?;

        // Single-logit classification head (num_labels = 1).
        let head = candle_nn::linear(config.hidden_size, 1, vb.pp("classifier"))
            .map_err(|e| Error::model_load(format!("failed to load classifier head: {e}")))?;

        let name = dir
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("textguard_bert")
            .to_string();

        tracing::info!(model = %name, "loaded BERT spam model");

        Ok(Self {
            tokenizer,
            encoder,
            head,
            device,
            name,
        })
    }

    /// Artifact name, taken from the model directory.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run one forward pass over a length-1 batch and return the raw logit.
    ///
    /// The same text always produces the same logit; no state is retained
    /// between calls.
    pub fn forward_logit(&self, text: &str) -> Result<f32> {
        let mut encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| Error::inference(format!("tokenization failed: {e}")))?;
        encoding.truncate(MAX_SEQ_LENGTH, 0, TruncationDirection::Right);

        let input_ids = Tensor::new(encoding.get_ids(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| Error::inference(format!("failed to build input tensor: {e}")))?;
        let token_type_ids = Tensor::new(encoding.get_type_ids(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| Error::inference(format!("failed to build token type tensor: {e}")))?;

        let hidden = self
            .encoder
            .forward(&input_ids, &token_type_ids, None)
            .map_err(|e| Error::inference(format!("encoder forward pass failed: {e}")))?;

        // Classify from the [CLS] token hidden state.
        let cls = hidden
            .i((.., 0))
            .map_err(|e| Error::inference(format!("failed to select CLS state: {e}")))?;
        let logits = self
            .head
            .forward(&cls)
            .map_err(|e| Error::inference(format!("classifier head failed: {e}")))?;

        let (batch, labels) = logits
            .dims2()
            .map_err(|e| Error::inference(format!("unexpected logits shape: {e}")))?;
        if batch != 1 || labels != 1 {
            return Err(Error::inference(format!(
                "expected a single logit for a length-1 batch, got shape ({batch}, {labels})"
            )));
        }

        logits
            .i((0, 0))
            .and_then(|t| t.to_scalar::<f32>())
            .map_err(|e| Error::inference(format!("failed to read logit: {e}")))
    }
}
