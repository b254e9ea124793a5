use hoodie_model::{MeshLoader, ModelService};
use hoodie_protocol::{Action, ModelSummary, StateEvent, StateSnapshot};

use crate::state::ModelState;

/// Applies one UI action to the state container and reports the result.
///
/// Failed loads are recorded in the state and also answered with
/// [`StateEvent::Error`]; every other action answers with a snapshot.
pub fn dispatch<L: MeshLoader>(
    state: &mut ModelState,
    service: &ModelService<L>,
    action: Action,
) -> StateEvent {
    match action {
        Action::LoadModel { url } => {
            if let Err(err) = state.load_model(service, &url) {
                return StateEvent::Error {
                    message: err.to_string(),
                };
            }
        }
        Action::CreateWireframe { options } => state.create_wireframe(&options),
        Action::ApplyTransformation { transform } => state.apply_transformation(&transform),
        Action::ToggleWireframe { enabled } => state.toggle_wireframe(enabled),
        Action::UndoTransformation => state.undo_transformation(),
        Action::ResetModel => state.reset_model(),
        Action::ClearModel => state.clear_model(),
    }
    StateEvent::StateChanged {
        snapshot: snapshot(state),
    }
}

pub fn snapshot(state: &ModelState) -> StateSnapshot {
    StateSnapshot {
        model: state.current_model().map(|model| ModelSummary {
            id: model.id,
            kind: model.kind,
            name: model.metadata.name.clone(),
            source: model.metadata.source.clone(),
            format: model.metadata.format,
            file_size: model.metadata.file_size,
            mesh_count: model.node.mesh_count(),
        }),
        is_loading: state.is_loading(),
        error: state.error().map(ToString::to_string),
        transformations: *state.transformations(),
        is_wireframe: state.is_wireframe(),
        history_len: state.history().len(),
    }
}
