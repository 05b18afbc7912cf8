//! Material order listing and the draft → sent → confirmed → delivered flow.

use tera::Tera;

use crate::domain::notification::NewEmailNotification;
use crate::domain::order::{MaterialOrder, OrderStatus, order_total_cents};
use crate::domain::types::EmailAddress;
use crate::dto::orders::{OrderPageData, OrdersPageData, OrdersQuery};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::Paginated;
use crate::repository::{
    CatalogReader, CatalogWriter, DocumentWriter, JobReader, NotificationWriter, OrderListQuery,
    OrderReader, OrderWriter,
};
use crate::routes::DEFAULT_ITEMS_PER_PAGE;
use crate::services::documents::generate_purchase_order;
use crate::services::{ServiceError, ServiceResult, ensure_role};
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

/// Loads the filtered purchase-order list.
pub fn load_orders_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: OrdersQuery,
) -> ServiceResult<OrdersPageData>
where
    R: OrderReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let page = query.page.unwrap_or(1);
    let mut list_query = OrderListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);

    let status_filter = query
        .status
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    if let Some(status) = &status_filter {
        list_query = list_query.status(status.parse::<OrderStatus>()?);
    }

    let (total, orders) = repo.list_orders(list_query)?;

    Ok(OrdersPageData {
        orders: Paginated::new(orders, page, total.div_ceil(DEFAULT_ITEMS_PER_PAGE)),
        status_filter,
    })
}

/// Loads one order with its lines, supplier, and job.
pub fn load_order_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    order_id: i32,
) -> ServiceResult<OrderPageData>
where
    R: OrderReader + CatalogReader + JobReader + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let (order, lines) = repo
        .get_order_by_id(order_id)?
        .ok_or(ServiceError::NotFound)?;

    let supplier = repo
        .get_supplier_by_id(order.supplier_id)?
        .ok_or(ServiceError::NotFound)?;
    let job = repo
        .get_job_by_id(order.job_id)?
        .ok_or(ServiceError::NotFound)?;

    let total_cents = order_total_cents(&lines);

    let mut rows = Vec::with_capacity(lines.len());
    for line in lines {
        let component = repo
            .get_component_by_id(line.component_id)?
            .ok_or(ServiceError::NotFound)?;
        rows.push((line, component));
    }

    Ok(OrderPageData {
        order,
        supplier,
        job,
        lines: rows,
        total_cents,
    })
}

/// Sends a draft order: renders the PO document and queues it to the supplier.
pub fn send_order<R>(
    repo: &R,
    tera: &Tera,
    user: &AuthenticatedUser,
    order_id: i32,
) -> ServiceResult<MaterialOrder>
where
    R: OrderReader
        + OrderWriter
        + CatalogReader
        + JobReader
        + DocumentWriter
        + NotificationWriter
        + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let page = load_order_page(repo, user, order_id)?;
    if page.order.status != OrderStatus::Draft {
        return Err(ServiceError::Form(
            "Only draft orders can be sent.".to_string(),
        ));
    }

    let document = generate_purchase_order(
        repo,
        tera,
        &page.order,
        &page.supplier,
        &page.job,
        &page.lines,
    )?;

    let recipient = EmailAddress::new(page.supplier.email.as_str())?;
    let notification = NewEmailNotification::new(
        recipient,
        format!("Purchase order {}", page.order.order_number),
        document.body_html.clone(),
    );
    repo.enqueue_notification(&notification)?;

    repo.set_order_status(order_id, OrderStatus::Sent)
        .map_err(ServiceError::from)
}

/// Marks a sent order as confirmed by the supplier.
pub fn confirm_order<R>(
    repo: &R,
    user: &AuthenticatedUser,
    order_id: i32,
) -> ServiceResult<MaterialOrder>
where
    R: OrderReader + OrderWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let (order, _) = repo
        .get_order_by_id(order_id)?
        .ok_or(ServiceError::NotFound)?;
    if order.status != OrderStatus::Sent {
        return Err(ServiceError::Form(
            "Only sent orders can be confirmed.".to_string(),
        ));
    }

    repo.set_order_status(order_id, OrderStatus::Confirmed)
        .map_err(ServiceError::from)
}

/// Marks a confirmed order delivered and books the stock in.
pub fn mark_delivered<R>(
    repo: &R,
    user: &AuthenticatedUser,
    order_id: i32,
) -> ServiceResult<MaterialOrder>
where
    R: OrderReader + OrderWriter + CatalogWriter + ?Sized,
{
    ensure_role(user, SERVICE_ACCESS_ROLE)?;

    let (order, lines) = repo
        .get_order_by_id(order_id)?
        .ok_or(ServiceError::NotFound)?;
    if order.status != OrderStatus::Confirmed {
        return Err(ServiceError::Form(
            "Only confirmed orders can be delivered.".to_string(),
        ));
    }

    let order = repo.set_order_status(order_id, OrderStatus::Delivered)?;

    for line in &lines {
        if let Err(err) = repo.adjust_component_stock(line.component_id, line.quantity) {
            log::error!(
                "Order {} delivered but stock for component {} not adjusted: {err}",
                order.order_number,
                line.component_id
            );
        }
    }

    Ok(order)
}
