pub mod definition;
pub mod model_response;
pub mod quiz_item;
pub mod simplification;
pub use definition::DefinitionResult;
pub use model_response::ModelResponse;
pub use quiz_item::{QuizItem, QuizSet};
pub use simplification::{ResultSource, SimplificationResult};
