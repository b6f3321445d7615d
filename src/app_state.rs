use std::sync::Arc;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    services::{
        define_service::DefineService,
        model_service::{GeminiTextModel, ModelInvoker, TextModel},
        simplify_service::SimplifyService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub simplify_service: Arc<SimplifyService>,
    pub define_service: Arc<DefineService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let model: Option<Arc<dyn TextModel>> = match &config.gemini_api_key {
            Some(api_key) => {
                let model = GeminiTextModel::new(
                    config.gemini_endpoint.clone(),
                    api_key.clone(),
                    config.model_timeout(),
                )
                .map_err(|e| AppError::InternalError(e.to_string()))?;
                log::info!("Generative backend configured at {}", config.gemini_endpoint);
                Some(Arc::new(model))
            }
            None => None,
        };

        Ok(Self::with_model(config, model))
    }

    /// Builds the services around an arbitrary backend. `None` means no
    /// credential: simplify is heuristic-only and define is unavailable.
    pub fn with_model(config: Config, model: Option<Arc<dyn TextModel>>) -> Self {
        let invoker = model.map(|model| ModelInvoker::new(model, config.model_timeout()));

        let simplify_service = Arc::new(SimplifyService::new(
            invoker.clone(),
            config.quiz_max_attempts,
        ));
        let define_service = Arc::new(DefineService::new(invoker));

        Self {
            simplify_service,
            define_service,
            config: Arc::new(config),
        }
    }
}
