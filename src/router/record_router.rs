use axum::{Router, routing::get};
use crate::handler::record_handler::{
    list_records_handler,
    get_record_handler,
    create_record_handler,
    update_record_handler,
    delete_record_handler,
};
use std::sync::Arc;
use crate::service::record_service::RecordServiceImpl;


pub fn record_router(service: Arc<RecordServiceImpl>) -> Router {
    Router::new()
        .route("/record", get(list_records_handler).post(create_record_handler))
        .route(
            "/record/{id}",
            get(get_record_handler)
                .patch(update_record_handler)
                .delete(delete_record_handler),
        )
        .with_state(service)
}
