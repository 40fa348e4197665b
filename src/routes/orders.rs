use std::time::Duration;

use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::types::OrderId;
use crate::forms::list::{PageForm, SearchForm, SortForm};
use crate::forms::order::SaveOrderForm;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::views::orders::{FormDialog, OrderListView};

/// How long the list page waits for an outstanding fetch before rendering
/// the loading state.
const RENDER_WAIT: Duration = Duration::from_secs(2);

const ORDERS_URL: &str = "/orders";

/// Session key of the create/edit dialog state.
const DIALOG_KEY: &str = "order_dialog";

fn load_dialog(session: &Session) -> FormDialog {
    match session.get::<FormDialog>(DIALOG_KEY) {
        Ok(dialog) => dialog.unwrap_or_default(),
        Err(err) => {
            log::warn!("Discarding unreadable dialog state: {err}");
            FormDialog::default()
        }
    }
}

fn store_dialog(session: &Session, dialog: &FormDialog) {
    if !dialog.is_open() {
        session.remove(DIALOG_KEY);
        return;
    }

    if let Err(err) = session.insert(DIALOG_KEY, dialog) {
        log::error!("Failed to store dialog state: {err}");
    }
}

#[get("/")]
pub async fn index() -> impl Responder {
    redirect(ORDERS_URL)
}

#[get("/orders")]
pub async fn show_orders(
    view: web::Data<OrderListView>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if tokio::time::timeout(RENDER_WAIT, view.controller().wait_idle())
        .await
        .is_err()
    {
        log::debug!("Rendering orders while a fetch is outstanding");
    }

    let mut context = base_context(&flash_messages, "orders");
    context.insert("page", &view.page_data(&load_dialog(&session)));

    render_template(&tera, "orders/index.html", &context)
}

#[post("/orders/search")]
pub async fn search_orders(
    view: web::Data<OrderListView>,
    web::Form(form): web::Form<SearchForm>,
) -> impl Responder {
    if let Some(dispatch) = view.search(&form.search) {
        dispatch.settled().await;
    }
    redirect(ORDERS_URL)
}

#[post("/orders/sort")]
pub async fn sort_orders(
    view: web::Data<OrderListView>,
    web::Form(form): web::Form<SortForm>,
) -> impl Responder {
    if let Some(dispatch) = view.sort_by(&form.column) {
        dispatch.settled().await;
    }
    redirect(ORDERS_URL)
}

#[post("/orders/page")]
pub async fn page_orders(
    view: web::Data<OrderListView>,
    web::Form(form): web::Form<PageForm>,
) -> impl Responder {
    let page_size = match form.page_size() {
        Ok(page_size) => page_size,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect(ORDERS_URL);
        }
    };

    let dispatch = match (page_size, form.page) {
        (Some(page_size), _) => view.set_page_size(page_size),
        (None, Some(page)) => view.go_to_page(page),
        (None, None) => None,
    };

    if let Some(dispatch) = dispatch {
        dispatch.settled().await;
    }
    redirect(ORDERS_URL)
}

#[post("/orders/refresh")]
pub async fn refresh_orders(view: web::Data<OrderListView>) -> impl Responder {
    view.refresh().settled().await;
    redirect(ORDERS_URL)
}

#[get("/orders/new")]
pub async fn new_order(view: web::Data<OrderListView>, session: Session) -> impl Responder {
    let mut dialog = FormDialog::default();
    view.open_create(&mut dialog);
    store_dialog(&session, &dialog);
    redirect(ORDERS_URL)
}

#[get("/orders/{order_id}/edit")]
pub async fn edit_order(
    order_id: web::Path<i32>,
    view: web::Data<OrderListView>,
    session: Session,
) -> impl Responder {
    let mut dialog = FormDialog::default();
    let opened = OrderId::new(order_id.into_inner())
        .map(|id| view.open_edit(&mut dialog, id))
        .unwrap_or(false);

    if opened {
        store_dialog(&session, &dialog);
    } else {
        FlashMessage::error("Order not found.").send();
    }
    redirect(ORDERS_URL)
}

#[post("/orders/cancel")]
pub async fn cancel_order(view: web::Data<OrderListView>, session: Session) -> impl Responder {
    let mut dialog = load_dialog(&session);
    view.cancel_form(&mut dialog);
    store_dialog(&session, &dialog);
    redirect(ORDERS_URL)
}

#[post("/orders/save")]
pub async fn save_order(
    view: web::Data<OrderListView>,
    session: Session,
    web::Form(form): web::Form<SaveOrderForm>,
) -> impl Responder {
    let mut dialog = load_dialog(&session);
    let result = view.submit_form(&mut dialog, form).await;
    store_dialog(&session, &dialog);

    match result {
        Ok(order) => {
            FlashMessage::success(format!("Order {} saved.", order.id)).send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Order not found.").send();
        }
        Err(err) => {
            log::error!("Failed to save the order: {err}");
            FlashMessage::error(format!("Failed to save the order: {err}")).send();
        }
    }
    redirect(ORDERS_URL)
}

#[post("/orders/{order_id}/delete")]
pub async fn delete_order(
    order_id: web::Path<i32>,
    view: web::Data<OrderListView>,
) -> impl Responder {
    let Ok(id) = OrderId::new(order_id.into_inner()) else {
        FlashMessage::error("Order not found.").send();
        return redirect(ORDERS_URL);
    };

    match view.delete(id).await {
        Ok(()) => {
            FlashMessage::success("Order deleted.").send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Order not found.").send();
        }
        Err(err) => {
            log::error!("Failed to delete the order: {err}");
            FlashMessage::error(format!("Failed to delete the order: {err}")).send();
        }
    }
    redirect(ORDERS_URL)
}

/// Fallback for unknown routes.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().finish()
}
