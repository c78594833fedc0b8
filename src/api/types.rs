use std::sync::Arc;

use crate::service::CheckInService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CheckInService>,
}

impl AppState {
    pub fn new(service: CheckInService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}
