use std::sync::Arc;

use crate::domain::food_analysis::value_objects::RetryPolicy;

/// Application service. Domain service traits (`FoodAnalysisService`,
/// `ChatService`, `ReportService`) are implemented on it in their own modules.
pub struct Service<H, L, I, C, E> {
    pub(crate) history_repository: Arc<H>,
    pub(crate) llm_client: Arc<L>,
    pub(crate) chat_llm_client: Arc<L>,
    pub(crate) image_store: Arc<I>,
    pub(crate) chat_repository: Arc<C>,
    pub(crate) report_exporter: Arc<E>,
    pub(crate) retry_policy: RetryPolicy,
}

impl<H, L, I, C, E> Service<H, L, I, C, E> {
    pub fn new(
        history_repository: H,
        llm_client: L,
        chat_llm_client: L,
        image_store: I,
        chat_repository: C,
        report_exporter: E,
        retry_policy: RetryPolicy,
    ) -> Self {
        Self {
            history_repository: Arc::new(history_repository),
            llm_client: Arc::new(llm_client),
            chat_llm_client: Arc::new(chat_llm_client),
            image_store: Arc::new(image_store),
            chat_repository: Arc::new(chat_repository),
            report_exporter: Arc::new(report_exporter),
            retry_policy,
        }
    }
}

impl<H, L, I, C, E> Clone for Service<H, L, I, C, E> {
    fn clone(&self) -> Self {
        Self {
            history_repository: Arc::clone(&self.history_repository),
            llm_client: Arc::clone(&self.llm_client),
            chat_llm_client: Arc::clone(&self.chat_llm_client),
            image_store: Arc::clone(&self.image_store),
            chat_repository: Arc::clone(&self.chat_repository),
            report_exporter: Arc::clone(&self.report_exporter),
            retry_policy: self.retry_policy,
        }
    }
}
