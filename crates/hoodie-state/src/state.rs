//! The single-writer model state container.

use hoodie_core::{TransformOptions, UploadedFile, ViewerConfig, WireframeOptions};
use hoodie_model::{
    apply_transform, create_wireframe_model, set_wireframe, GltfLoader, MeshLoader, Model,
    ModelError, ModelService,
};
use tracing::{debug, info, warn};

use crate::history::History;

/// Issued by [`ModelState::begin_load`]; only the newest ticket may commit a load.
#[derive(Debug)]
#[must_use]
pub struct LoadTicket {
    seq: u64,
    url: String,
}

impl LoadTicket {
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Holds the active model and everything derived from it. Only the methods
/// here mutate it; callers get `&Model` borrows.
#[derive(Debug)]
pub struct ModelState {
    current_model: Option<Model>,
    is_loading: bool,
    error: Option<ModelError>,
    transformations: TransformOptions,
    is_wireframe: bool,
    history: History,
    load_seq: u64,
}

impl Default for ModelState {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ModelState {
    pub fn new(history_limit: Option<usize>) -> Self {
        Self {
            current_model: None,
            is_loading: false,
            error: None,
            transformations: TransformOptions::identity(),
            is_wireframe: false,
            history: History::new(history_limit),
            load_seq: 0,
        }
    }

    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::new(config.history_limit)
    }

    pub fn current_model(&self) -> Option<&Model> {
        self.current_model.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&ModelError> {
        self.error.as_ref()
    }

    pub fn transformations(&self) -> &TransformOptions {
        &self.transformations
    }

    pub fn is_wireframe(&self) -> bool {
        self.is_wireframe
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Marks a load as in flight. Any earlier ticket becomes stale.
    pub fn begin_load(&mut self, url: &str) -> LoadTicket {
        self.load_seq += 1;
        self.is_loading = true;
        debug!(url, seq = self.load_seq, "load started");
        LoadTicket {
            seq: self.load_seq,
            url: url.to_string(),
        }
    }

    /// Commits a load result. Returns `false` if the ticket was superseded, in
    /// which case the result is dropped.
    ///
    /// The history entry appended on success is the transform in effect before
    /// the load; the new model itself keeps its normalized pose.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Model, ModelError>) -> bool {
        if ticket.seq != self.load_seq {
            warn!(url = %ticket.url, seq = ticket.seq, latest = self.load_seq, "discarding stale load");
            if let Ok(model) = result {
                model.dispose();
            }
            return false;
        }

        self.is_loading = false;
        match result {
            Ok(mut model) => {
                set_wireframe(&mut model.node, self.is_wireframe);
                info!(url = %ticket.url, id = %model.id, "model replaced");
                self.replace_model(model);
                self.error = None;
                self.history.push(self.transformations);
            }
            Err(err) => {
                warn!(url = %ticket.url, %err, "load failed");
                self.error = Some(err);
            }
        }
        true
    }

    pub fn load_model<L: MeshLoader>(
        &mut self,
        service: &ModelService<L>,
        url: &str,
    ) -> Result<(), ModelError> {
        let ticket = self.begin_load(url);
        let result = service.load_model(url);
        self.commit(ticket, result)
    }

    pub fn load_upload(
        &mut self,
        service: &ModelService<GltfLoader>,
        file: &UploadedFile,
    ) -> Result<(), ModelError> {
        let ticket = self.begin_load(&file.name);
        let result = service.load_upload(file);
        self.commit(ticket, result)
    }

    fn commit(&mut self, ticket: LoadTicket, result: Result<Model, ModelError>) -> Result<(), ModelError> {
        let err = result.as_ref().err().cloned();
        self.finish_load(ticket, result);
        match err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn create_wireframe(&mut self, options: &WireframeOptions) {
        let model = create_wireframe_model(options);
        self.replace_model(model);
        self.is_wireframe = true;
        self.transformations = TransformOptions::identity();
        self.history.push(self.transformations);
    }

    pub fn apply_transformation(&mut self, partial: &TransformOptions) {
        let Some(model) = self.current_model.as_mut() else {
            debug!("apply_transformation without a model");
            return;
        };
        let merged = self.transformations.merge(partial);
        apply_transform(&mut model.node, &merged);
        model.metadata.touch();
        self.transformations = merged;
        self.history.push(merged);
    }

    pub fn toggle_wireframe(&mut self, explicit: Option<bool>) {
        let Some(model) = self.current_model.as_mut() else {
            debug!("toggle_wireframe without a model");
            return;
        };
        let enabled = explicit.unwrap_or(!self.is_wireframe);
        set_wireframe(&mut model.node, enabled);
        self.is_wireframe = enabled;
    }

    pub fn undo_transformation(&mut self) {
        let Some(model) = self.current_model.as_mut() else {
            debug!("undo without a model");
            return;
        };
        if self.history.len() <= 1 {
            return;
        }
        self.history.pop();
        if let Some(entry) = self.history.last() {
            let previous = entry.transformations;
            apply_transform(&mut model.node, &previous);
            model.metadata.touch();
            self.transformations = previous;
        }
    }

    pub fn reset_model(&mut self) {
        let Some(model) = self.current_model.as_mut() else {
            debug!("reset without a model");
            return;
        };
        apply_transform(&mut model.node, &TransformOptions::identity());
        self.reset_history();
    }

    /// Drops the error and cancels any in-flight load. If a model was present
    /// it is disposed and the transform history resets to a single identity
    /// entry; otherwise history is left untouched.
    pub fn clear_model(&mut self) {
        self.error = None;
        if self.is_loading {
            self.load_seq += 1;
            self.is_loading = false;
        }
        let Some(model) = self.current_model.take() else {
            debug!("clear without a model");
            return;
        };
        model.dispose();
        self.reset_history();
    }

    fn reset_history(&mut self) {
        self.transformations = TransformOptions::identity();
        self.history.clear();
        self.history.push(self.transformations);
    }

    fn replace_model(&mut self, model: Model) {
        if let Some(previous) = self.current_model.replace(model) {
            previous.dispose();
        }
    }
}
