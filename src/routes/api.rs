use actix_files::Files;
use actix_web::web;

use crate::handlers;
use crate::services::storage::UPLOADS_ROUTE;
use crate::state::AppState;

/// Registers the route table. The public assets directory is mounted at `/`
/// and must stay last, since it swallows every path it is reached with.
pub fn configure(state: web::Data<AppState>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let uploads_dir = state.storage.dir().to_path_buf();
        let public_dir = state.public_dir.clone();

        cfg.app_data(state)
            .service(web::resource("/photos").route(web::get().to(handlers::photos::all)))
            .service(web::resource("/upload").route(web::post().to(handlers::photos::upload)))
            .service(Files::new(UPLOADS_ROUTE, uploads_dir))
            .service(web::resource("/").route(web::get().to(handlers::pages::gallery)))
            .service(web::resource("/u").route(web::get().to(handlers::pages::upload_form)))
            .service(Files::new("/", public_dir));
    }
}
