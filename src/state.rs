use crate::models::DailyRow;
use crate::source::DailySource;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub rows: Arc<Mutex<Vec<DailyRow>>>,
    pub source: Arc<dyn DailySource>,
}

impl AppState {
    pub fn new(rows: Vec<DailyRow>, source: Arc<dyn DailySource>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
            source,
        }
    }
}
