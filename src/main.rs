use std::env;

use actix_cors::Cors;
use actix_web::{App, HttpServer, Responder, middleware::Logger, web};
use log::{error, info};

use linkup_be::AppState;
use linkup_be::config;
use linkup_be::handlers::auth_handlers::{get_profile, login, signup, update_profile};
use linkup_be::handlers::post_handlers::{
    add_comment, create_post, delete_comment, delete_post, edit_post, list_posts, toggle_like,
};
use linkup_be::services::token_service::TokenService;

// base64 image posts run a few MB
const JSON_BODY_LIMIT: usize = 5 * 1024 * 1024;

async fn index() -> impl Responder {
    "LinkUp API is running!"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    dotenv::dotenv().ok();

    let pg_pool = match config::get_pg_pool() {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to create PG pool: {}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = config::init_schema(&pg_pool).await {
        error!("Failed to initialize schema: {}", e);
        std::process::exit(1);
    }

    let tokens = web::Data::new(TokenService::new_from_env());
    let state = web::Data::new(AppState { pg_pool });

    let allowed_origins = env::var("ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".into());

    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_address = format!("0.0.0.0:{}", port);
    info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                "authorization",
                "content-type",
                "accept",
                "x-requested-with",
            ])
            .supports_credentials()
            .max_age(3600);

        for origin in allowed_origins
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
        {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(tokens.clone())
            .app_data(web::JsonConfig::default().limit(JSON_BODY_LIMIT))
            .route("/", web::get().to(index))
            .service(
                web::scope("/auth")
                    .service(signup)
                    .service(login)
                    .service(get_profile)
                    .service(update_profile),
            )
            .service(
                web::scope("/posts")
                    .service(list_posts)
                    .service(create_post)
                    .service(toggle_like)
                    .service(add_comment)
                    .service(delete_comment)
                    .service(edit_post)
                    .service(delete_post),
            )
    })
    .bind(&bind_address)?
    .run()
    .await
}
