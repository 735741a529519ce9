//! Entity Source: the optional named-entity capability used by the name resolver.
//!
//! A source either returns PERSON spans or reports itself unavailable
//! (`None`). Unavailability is never an error: the resolver moves on.

/// Something that can tag PERSON spans in free text.
pub trait EntitySource: Send + Sync {
    /// PERSON spans in document order, or `None` when no model is loaded.
    fn person_spans(&self, text: &str) -> Option<Vec<String>>;

    /// Short label for logs.
    fn backend(&self) -> &'static str;
}

/// Used when no entity model is compiled in or it failed to load.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEntityModel;

impl EntitySource for NoEntityModel {
    fn person_spans(&self, _text: &str) -> Option<Vec<String>> {
        None
    }

    fn backend(&self) -> &'static str {
        "none"
    }
}

#[cfg(feature = "ner")]
pub use bert::BertEntitySource;

#[cfg(feature = "ner")]
mod bert {
    use std::sync::Mutex;

    use anyhow::Result;
    use rust_bert::pipelines::ner::NERModel;
    use tracing::warn;

    use super::EntitySource;

    /// PERSON spans from the default rust-bert NER pipeline.
    ///
    /// The model is not `Sync`, so calls are serialized behind a mutex.
    pub struct BertEntitySource {
        model: Mutex<NERModel>,
    }

    impl BertEntitySource {
        /// Loads (and on first use downloads) the default NER model. Blocking.
        pub fn load() -> Result<Self> {
            let model = NERModel::new(Default::default())?;
            Ok(Self {
                model: Mutex::new(model),
            })
        }
    }

    impl EntitySource for BertEntitySource {
        fn person_spans(&self, text: &str) -> Option<Vec<String>> {
            let model = match self.model.lock() {
                Ok(model) => model,
                Err(_) => {
                    warn!("NER model mutex poisoned; skipping entity stage");
                    return None;
                }
            };
            let spans = model
                .predict_full_entities(&[text])
                .into_iter()
                .flatten()
                .filter(|entity| matches!(entity.label.as_str(), "PER" | "B-PER" | "I-PER"))
                .map(|entity| entity.word)
                .collect();
            Some(spans)
        }

        fn backend(&self) -> &'static str {
            "rust-bert"
        }
    }
}
