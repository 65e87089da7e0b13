pub mod bindings;
pub mod form;
pub mod step;

pub use bindings::{BindingUpdate, ExtractionError, StepInputs, StepOutputs, ViewState};
pub use form::{FormDescriptor, FormField};
pub use step::{collect, configure, execute, StepSignaler, STEP_CALLBACK_ID};
