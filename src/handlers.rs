use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::stripe::{Auth, CheckoutSession, LineItem, Price, Product};
use actix_web::{web, HttpResponse, Responder};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

/// The product shape the storefront frontend works with: one product, one
/// active price, amounts in major units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub price_id: String,
}

/// A completed checkout session flattened into the storefront's order shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderView {
    pub id: String,
    pub product_name: String,
    pub amount: f64,
    pub timestamp: i64,
    pub customer_email: String,
}

#[derive(Debug, Deserialize)]
pub struct NewProduct {
    pub name: Option<String>,
    pub price: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub price_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub price_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CheckoutView {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteView {
    pub success: bool,
    pub message: String,
}

/// Stripe speaks integer minor units (cents); the frontend speaks decimal
/// major units. Conversion happens exactly once, at this boundary.
pub fn to_minor_units(major: f64) -> i64 {
    (major * 100.0).round() as i64
}

pub fn to_major_units(minor: i64) -> f64 {
    minor as f64 / 100.0
}

/// Fallback catalog served when Stripe is unreachable, so the storefront
/// stays browsable. Checkout against these ids will not work.
pub fn fallback_products() -> Vec<ProductView> {
    vec![
        ProductView {
            id: "1".to_string(),
            name: "Small Coffee".to_string(),
            price: 3.0,
            price_id: "price_small".to_string(),
        },
        ProductView {
            id: "2".to_string(),
            name: "Medium Coffee".to_string(),
            price: 5.0,
            price_id: "price_medium".to_string(),
        },
        ProductView {
            id: "3".to_string(),
            name: "Large Coffee".to_string(),
            price: 7.0,
            price_id: "price_large".to_string(),
        },
        ProductView {
            id: "4".to_string(),
            name: "Coffee Bundle".to_string(),
            price: 20.0,
            price_id: "price_bundle".to_string(),
        },
    ]
}

fn require_name(name: &Option<String>) -> GatewayResult<String> {
    match name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(GatewayError::Validation("Name is required".to_string())),
    }
}

fn require_price(price: Option<f64>) -> GatewayResult<f64> {
    match price {
        Some(price) if price > 0.0 && price.is_finite() => Ok(price),
        _ => Err(GatewayError::Validation(
            "Price is required and must be a positive number".to_string(),
        )),
    }
}

fn require_price_id(price_id: &Option<String>) -> GatewayResult<String> {
    match price_id.as_deref().map(str::trim) {
        Some(price_id) if !price_id.is_empty() => Ok(price_id.to_string()),
        _ => Err(GatewayError::Validation("Price ID is required".to_string())),
    }
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

/// GET /products: active products with their single active price. Degrades
/// to the fallback catalog on any upstream failure or an empty result;
/// product listing must never take the storefront down.
pub async fn get_products(config: web::Data<GatewayConfig>) -> impl Responder {
    match fetch_storefront_products(config.stripe_auth()).await {
        Ok(products) if !products.is_empty() => HttpResponse::Ok().json(products),
        Ok(_) => {
            warn!("No products found in Stripe, returning fallback catalog");
            HttpResponse::Ok().json(fallback_products())
        }
        Err(e) => {
            error!("Stripe error fetching products: {e}");
            HttpResponse::Ok().json(fallback_products())
        }
    }
}

async fn fetch_storefront_products(creds: Auth) -> GatewayResult<Vec<ProductView>> {
    let stripe_products = Product::async_list_active(creds.clone()).await?;
    info!("Found {} products in Stripe", stripe_products.len());

    let mut formatted_products = Vec::new();
    for product in stripe_products {
        let product_id = match product.id {
            Some(id) => id,
            None => continue,
        };
        let product_name = product.name.unwrap_or_default();
        debug!("Fetching prices for product: {product_id} - {product_name}");

        // each product can hold several price records; the storefront keeps
        // exactly one active
        let prices = Price::async_list_for_product(creds.clone(), product_id.clone(), 1).await?;
        match prices.into_iter().next() {
            Some(Price {
                id: Some(price_id),
                unit_amount: Some(unit_amount),
                ..
            }) => {
                formatted_products.push(ProductView {
                    id: product_id,
                    name: product_name,
                    price: to_major_units(unit_amount),
                    price_id,
                });
            }
            _ => {
                debug!("No prices found for product: {product_id} - {product_name}");
            }
        }
    }
    Ok(formatted_products)
}

/// POST /products: create the product record, then its price record. If the
/// price creation fails the product is left orphaned; there is no rollback.
pub async fn create_product(
    config: web::Data<GatewayConfig>,
    body: web::Json<NewProduct>,
) -> GatewayResult<HttpResponse> {
    let product_name = require_name(&body.name)?;
    let product_price = require_price(body.price)?;
    let creds = config.stripe_auth();

    let new_product = Product {
        name: Some(product_name.clone()),
        ..Product::new()
    }
    .async_post(creds.clone())
    .await?;
    let product_id = new_product
        .id
        .ok_or_else(|| GatewayError::Unexpected("Stripe product response missing id".to_string()))?;

    let new_price = Price {
        currency: Some(config.currency.clone()),
        unit_amount: Some(to_minor_units(product_price)),
        product: Some(product_id.clone()),
        ..Price::new()
    }
    .async_post(creds)
    .await?;
    let price_id = new_price
        .id
        .ok_or_else(|| GatewayError::Unexpected("Stripe price response missing id".to_string()))?;

    info!("Created product {product_id} with price {price_id}");
    Ok(HttpResponse::Created().json(ProductView {
        id: product_id,
        name: product_name,
        price: product_price,
        price_id,
    }))
}

/// PUT /products/{product_id}: rename in place; a price change creates a
/// new price record, re-points the product default, and deactivates the old
/// record. The three steps are not transactional: a failure in between
/// leaves a partial state that the next update can repair.
pub async fn update_product(
    config: web::Data<GatewayConfig>,
    path: web::Path<String>,
    body: web::Json<ProductUpdate>,
) -> GatewayResult<HttpResponse> {
    let product_id = path.into_inner();
    let product_name = require_name(&body.name)?;
    let product_price = require_price(body.price)?;
    let mut price_id = require_price_id(&body.price_id)?;
    let creds = config.stripe_auth();

    let stripe_product = Product::async_get(creds.clone(), product_id.clone()).await?;
    let stripe_price = Price::async_get(creds.clone(), price_id.clone()).await?;

    // if name is changed, update product name
    if stripe_product.name.as_deref() != Some(product_name.as_str()) {
        Product {
            name: Some(product_name.clone()),
            ..Product::new()
        }
        .async_update(creds.clone(), product_id.clone())
        .await?;
    }

    // prices are append-only: a changed amount means a new record
    if stripe_price.unit_amount != Some(to_minor_units(product_price)) {
        let new_price = Price {
            currency: Some(config.currency.clone()),
            unit_amount: Some(to_minor_units(product_price)),
            product: Some(product_id.clone()),
            ..Price::new()
        }
        .async_post(creds.clone())
        .await?;
        let new_price_id = new_price.id.ok_or_else(|| {
            GatewayError::Unexpected("Stripe price response missing id".to_string())
        })?;

        Product {
            default_price: Some(new_price_id.clone()),
            ..Product::new()
        }
        .async_update(creds.clone(), product_id.clone())
        .await?;

        Price {
            active: Some(false),
            ..Price::new()
        }
        .async_update(creds, price_id.clone())
        .await?;

        info!("Rotated price for product {product_id}: {price_id} -> {new_price_id}");
        price_id = new_price_id;
    }

    Ok(HttpResponse::Ok().json(ProductView {
        id: product_id,
        name: product_name,
        price: product_price,
        price_id,
    }))
}

/// DELETE /products/{product_id}: Stripe refuses to hard-delete a product
/// with price records, so delete means archive: the product stays fetchable
/// by id but drops out of active listings.
pub async fn delete_product(
    config: web::Data<GatewayConfig>,
    path: web::Path<String>,
) -> GatewayResult<HttpResponse> {
    let product_id = path.into_inner();

    Product {
        active: Some(false),
        ..Product::new()
    }
    .async_update(config.stripe_auth(), product_id.clone())
    .await?;

    info!("Archived product {product_id}");
    Ok(HttpResponse::Ok().json(DeleteView {
        success: true,
        message: "Product archived; Stripe keeps the record but it no longer lists".to_string(),
    }))
}

/// GET /orders: completed checkout sessions flattened into orders. Unlike
/// the product listing this surface fails loudly: no partial results.
pub async fn get_orders(config: web::Data<GatewayConfig>) -> GatewayResult<HttpResponse> {
    let creds = config.stripe_auth();
    let sessions = CheckoutSession::async_list_complete(creds.clone(), config.orders_limit).await?;

    let mut formatted_orders = Vec::new();
    for session in sessions {
        let session_id = session.id.clone().ok_or_else(|| {
            GatewayError::Unexpected("Stripe checkout session missing id".to_string())
        })?;
        let line_items =
            CheckoutSession::async_list_line_items(creds.clone(), session_id).await?;
        formatted_orders.push(order_from_session(&session, &line_items)?);
    }
    info!("Returning {} completed orders", formatted_orders.len());
    Ok(HttpResponse::Ok().json(formatted_orders))
}

/// The storefront sells exactly one item per checkout. That assumption is
/// enforced here: a session with any other line-item count fails loudly
/// instead of silently taking the first element.
fn order_from_session(
    session: &CheckoutSession,
    line_items: &[LineItem],
) -> GatewayResult<OrderView> {
    let session_id = session.id.clone().unwrap_or_default();
    if line_items.len() != 1 {
        return Err(GatewayError::Unexpected(format!(
            "expected exactly one line item for session {}, found {}",
            session_id,
            line_items.len()
        )));
    }
    let item = &line_items[0];

    Ok(OrderView {
        id: session_id,
        product_name: item.description.clone().unwrap_or_default(),
        amount: to_major_units(item.amount_total.or(session.amount_total).unwrap_or(0)),
        timestamp: session.created.unwrap_or(0),
        customer_email: session
            .customer_details
            .as_ref()
            .and_then(|details| details.email.clone())
            .unwrap_or_default(),
    })
}

/// POST /checkout: single-item, quantity-1, one-time-payment hosted
/// checkout. Validation failures never reach Stripe.
pub async fn create_checkout_session(
    config: web::Data<GatewayConfig>,
    body: web::Json<CheckoutRequest>,
) -> GatewayResult<HttpResponse> {
    let price_id = require_price_id(&body.price_id)?;

    let checkout_session = CheckoutSession {
        mode: Some("payment".to_string()),
        success_url: Some(config.success_url.clone()),
        cancel_url: Some(config.cancel_url.clone()),
        line_items: Some(vec![LineItem {
            price: Some(price_id),
            quantity: Some(1),
            ..LineItem::default()
        }]),
        ..CheckoutSession::new()
    }
    .async_post(config.stripe_auth())
    .await?;

    let url = checkout_session.url.ok_or_else(|| {
        GatewayError::Unexpected("Stripe checkout session missing redirect url".to_string())
    })?;

    // the frontend handles the redirect to Stripe's hosted page
    Ok(HttpResponse::Ok().json(CheckoutView { url }))
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/products", web::get().to(get_products))
        .route("/products", web::post().to(create_product))
        .route("/products/{product_id}", web::put().to(update_product))
        .route("/products/{product_id}", web::delete().to(delete_product))
        .route("/orders", web::get().to(get_orders))
        .route("/checkout", web::post().to(create_checkout_session));
}

/// Malformed request bodies answer with the same `{"error": ...}` envelope
/// as every other failure.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        actix_web::Error::from(GatewayError::Validation(err.to_string()))
    })
}
