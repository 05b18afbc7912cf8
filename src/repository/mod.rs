use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::blog::{BlogPost, NewBlogPost, UpdateBlogPost};
use crate::domain::catalog::{
    Component, NewComponent, NewQuoteItem, NewSupplier, QuoteItem, Supplier, UpdateComponent,
};
use crate::domain::document::{Document, NewDocument};
use crate::domain::hr::{
    Application, ApplicationStatus, NewApplication, NewPosition, NewVacancy, Position, Vacancy,
    VacancyStatus,
};
use crate::domain::job::{
    InstallationJob, JobStatus, NewInstallationJob, NewScheduleToken, ScheduleToken,
    UpdateInstallationJob,
};
use crate::domain::lead::{Lead, LeadStatus, NewLead, UpdateLead};
use crate::domain::lead_event::{LeadEvent, LeadEventType, NewLeadEvent};
use crate::domain::notification::{EmailNotification, NewEmailNotification};
use crate::domain::order::{MaterialOrder, NewMaterialOrder, NewOrderLine, OrderLine, OrderStatus};
use crate::domain::team::{NewTeam, NewTeamMember, Team, TeamMember};
use crate::domain::types::PublicId;
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub mod blog;
pub mod catalog;
pub mod document;
pub mod errors;
pub mod hr;
pub mod job;
pub mod lead;
pub mod lead_event;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod notification;
pub mod order;
pub mod team;

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn conn(&self) -> Result<DbConnection, RepositoryError> {
        Ok(get_connection(&self.pool)?)
    }
}

#[derive(Debug, Clone)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

#[derive(Debug, Clone, Default)]
pub struct LeadListQuery {
    pub status: Option<LeadStatus>,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl LeadListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: LeadStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone)]
pub struct LeadEventListQuery {
    pub lead_id: i32,
    pub event_type: Option<LeadEventType>,
    pub pagination: Option<Pagination>,
}

impl LeadEventListQuery {
    pub fn new(lead_id: i32) -> Self {
        Self {
            lead_id,
            event_type: None,
            pagination: None,
        }
    }

    pub fn event_type(mut self, event_type: LeadEventType) -> Self {
        self.event_type = Some(event_type);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct JobListQuery {
    pub status: Option<JobStatus>,
    pub team_id: Option<i32>,
    pub pagination: Option<Pagination>,
}

impl JobListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: JobStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn team(mut self, team_id: i32) -> Self {
        self.team_id = Some(team_id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
    pub pagination: Option<Pagination>,
}

impl OrderListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait LeadReader {
    fn get_lead_by_id(&self, id: i32) -> RepositoryResult<Option<Lead>>;
    fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)>;
    fn list_quote_items(&self, lead_id: i32) -> RepositoryResult<Vec<(QuoteItem, Component)>>;
}

pub trait LeadWriter {
    fn create_leads(&self, new_leads: &[NewLead]) -> RepositoryResult<usize>;
    fn update_lead(&self, lead_id: i32, updates: &UpdateLead) -> RepositoryResult<Lead>;
    fn set_lead_status(&self, lead_id: i32, status: LeadStatus) -> RepositoryResult<Lead>;
    fn delete_lead(&self, lead_id: i32) -> RepositoryResult<()>;
    fn replace_quote_items(
        &self,
        lead_id: i32,
        items: &[NewQuoteItem],
    ) -> RepositoryResult<usize>;
}

pub trait LeadEventReader {
    fn list_lead_events(
        &self,
        query: LeadEventListQuery,
    ) -> RepositoryResult<(usize, Vec<LeadEvent>)>;
}

pub trait LeadEventWriter {
    fn create_lead_event(&self, event: &NewLeadEvent) -> RepositoryResult<LeadEvent>;
}

pub trait JobReader {
    fn get_job_by_id(&self, id: i32) -> RepositoryResult<Option<InstallationJob>>;
    fn get_job_by_lead_id(&self, lead_id: i32) -> RepositoryResult<Option<InstallationJob>>;
    fn list_jobs(&self, query: JobListQuery) -> RepositoryResult<(usize, Vec<InstallationJob>)>;
    fn latest_job_number_with_prefix(&self, prefix: &str) -> RepositoryResult<Option<String>>;
}

pub trait JobWriter {
    fn create_job(&self, new_job: &NewInstallationJob) -> RepositoryResult<InstallationJob>;
    fn update_job(
        &self,
        job_id: i32,
        updates: &UpdateInstallationJob,
    ) -> RepositoryResult<InstallationJob>;
}

pub trait ScheduleTokenReader {
    fn get_schedule_token(&self, token: &str) -> RepositoryResult<Option<ScheduleToken>>;
}

pub trait ScheduleTokenWriter {
    fn create_schedule_token(
        &self,
        new_token: &NewScheduleToken,
    ) -> RepositoryResult<ScheduleToken>;
    fn mark_schedule_token_used(&self, token_id: i32) -> RepositoryResult<()>;
}

pub trait TeamReader {
    fn get_team_by_id(&self, id: i32) -> RepositoryResult<Option<Team>>;
    fn list_teams(&self, active_only: bool) -> RepositoryResult<Vec<Team>>;
    fn list_team_members(&self, team_id: i32) -> RepositoryResult<Vec<TeamMember>>;
    fn find_team_for_member(&self, email: &str) -> RepositoryResult<Option<Team>>;
}

pub trait TeamWriter {
    fn create_team(&self, new_team: &NewTeam) -> RepositoryResult<Team>;
    fn update_team(&self, team_id: i32, updates: &NewTeam) -> RepositoryResult<Team>;
    fn replace_team_members(
        &self,
        team_id: i32,
        members: &[NewTeamMember],
    ) -> RepositoryResult<usize>;
    fn delete_team(&self, team_id: i32) -> RepositoryResult<()>;
}

pub trait CatalogReader {
    fn get_supplier_by_id(&self, id: i32) -> RepositoryResult<Option<Supplier>>;
    fn list_suppliers(&self, active_only: bool) -> RepositoryResult<Vec<Supplier>>;
    fn get_component_by_id(&self, id: i32) -> RepositoryResult<Option<Component>>;
    fn list_components(&self) -> RepositoryResult<Vec<(Component, Supplier)>>;
}

pub trait CatalogWriter {
    fn create_supplier(&self, new_supplier: &NewSupplier) -> RepositoryResult<Supplier>;
    fn update_supplier(
        &self,
        supplier_id: i32,
        updates: &NewSupplier,
    ) -> RepositoryResult<Supplier>;
    fn create_component(&self, new_component: &NewComponent) -> RepositoryResult<Component>;
    fn update_component(
        &self,
        component_id: i32,
        updates: &UpdateComponent,
    ) -> RepositoryResult<Component>;
    fn adjust_component_stock(&self, component_id: i32, delta: i32)
    -> RepositoryResult<Component>;
}

pub trait OrderReader {
    fn get_order_by_id(
        &self,
        id: i32,
    ) -> RepositoryResult<Option<(MaterialOrder, Vec<OrderLine>)>>;
    fn list_orders(
        &self,
        query: OrderListQuery,
    ) -> RepositoryResult<(usize, Vec<(MaterialOrder, Supplier)>)>;
    fn list_orders_for_job(&self, job_id: i32) -> RepositoryResult<Vec<MaterialOrder>>;
}

pub trait OrderWriter {
    fn create_order(
        &self,
        new_order: &NewMaterialOrder,
        lines: &[NewOrderLine],
    ) -> RepositoryResult<MaterialOrder>;
    fn set_order_status(&self, order_id: i32, status: OrderStatus)
    -> RepositoryResult<MaterialOrder>;
}

pub trait HrReader {
    fn list_positions(&self) -> RepositoryResult<Vec<Position>>;
    fn get_position_by_id(&self, id: i32) -> RepositoryResult<Option<Position>>;
    fn list_vacancies(&self) -> RepositoryResult<Vec<(Vacancy, Position)>>;
    fn get_vacancy_by_id(&self, id: i32) -> RepositoryResult<Option<Vacancy>>;
    fn list_applications(&self, vacancy_id: Option<i32>) -> RepositoryResult<Vec<Application>>;
    fn get_application_by_id(&self, id: i32) -> RepositoryResult<Option<Application>>;
}

pub trait HrWriter {
    fn create_position(&self, new_position: &NewPosition) -> RepositoryResult<Position>;
    fn update_position(
        &self,
        position_id: i32,
        updates: &NewPosition,
    ) -> RepositoryResult<Position>;
    fn create_vacancy(&self, new_vacancy: &NewVacancy) -> RepositoryResult<Vacancy>;
    fn set_vacancy_status(
        &self,
        vacancy_id: i32,
        status: VacancyStatus,
    ) -> RepositoryResult<Vacancy>;
    fn create_application(
        &self,
        new_application: &NewApplication,
    ) -> RepositoryResult<Application>;
    fn set_application_status(
        &self,
        application_id: i32,
        status: ApplicationStatus,
    ) -> RepositoryResult<Application>;
}

pub trait DocumentReader {
    fn get_document_by_public_id(
        &self,
        public_id: &PublicId,
    ) -> RepositoryResult<Option<Document>>;
    fn list_documents_for_lead(&self, lead_id: i32) -> RepositoryResult<Vec<Document>>;
    fn list_documents_for_job(&self, job_id: i32) -> RepositoryResult<Vec<Document>>;
}

pub trait DocumentWriter {
    fn create_document(&self, new_document: &NewDocument) -> RepositoryResult<Document>;
}

pub trait BlogReader {
    fn list_blog_posts(&self, published_only: bool) -> RepositoryResult<Vec<BlogPost>>;
    fn get_blog_post_by_id(&self, id: i32) -> RepositoryResult<Option<BlogPost>>;
    fn get_blog_post_by_slug(&self, slug: &str) -> RepositoryResult<Option<BlogPost>>;
}

pub trait BlogWriter {
    fn create_blog_post(&self, new_post: &NewBlogPost) -> RepositoryResult<BlogPost>;
    fn update_blog_post(&self, post_id: i32, updates: &UpdateBlogPost)
    -> RepositoryResult<BlogPost>;
    fn delete_blog_post(&self, post_id: i32) -> RepositoryResult<()>;
}

pub trait NotificationReader {
    fn list_pending_notifications(&self, limit: usize)
    -> RepositoryResult<Vec<EmailNotification>>;
}

pub trait NotificationWriter {
    fn enqueue_notification(
        &self,
        notification: &NewEmailNotification,
    ) -> RepositoryResult<EmailNotification>;
    fn mark_notification_sent(&self, id: i32) -> RepositoryResult<()>;
    fn mark_notification_failed(&self, id: i32, error: &str) -> RepositoryResult<()>;
}
