//! Mock repository implementations for isolating services in tests.

use mockall::mock;

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
    InstallationJob, NewInstallationJob, NewScheduleToken, ScheduleToken, UpdateInstallationJob,
};
use crate::domain::lead::{Lead, LeadStatus, NewLead, UpdateLead};
use crate::domain::lead_event::{LeadEvent, NewLeadEvent};
use crate::domain::notification::{EmailNotification, NewEmailNotification};
use crate::domain::order::{MaterialOrder, NewMaterialOrder, NewOrderLine, OrderLine, OrderStatus};
use crate::domain::team::{NewTeam, NewTeamMember, Team, TeamMember};
use crate::domain::types::PublicId;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    BlogReader, BlogWriter, CatalogReader, CatalogWriter, DocumentReader, DocumentWriter,
    HrReader, HrWriter, JobListQuery, JobReader, JobWriter, LeadEventListQuery, LeadEventReader,
    LeadEventWriter, LeadListQuery, LeadReader, LeadWriter, NotificationReader,
    NotificationWriter, OrderListQuery, OrderReader, OrderWriter, ScheduleTokenReader,
    ScheduleTokenWriter, TeamReader, TeamWriter,
};

mock! {
    pub Repository {}

    impl LeadReader for Repository {
        fn get_lead_by_id(&self, id: i32) -> RepositoryResult<Option<Lead>>;
        fn list_leads(&self, query: LeadListQuery) -> RepositoryResult<(usize, Vec<Lead>)>;
        fn list_quote_items(&self, lead_id: i32) -> RepositoryResult<Vec<(QuoteItem, Component)>>;
    }

    impl LeadWriter for Repository {
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

    impl LeadEventReader for Repository {
        fn list_lead_events(
            &self,
            query: LeadEventListQuery,
        ) -> RepositoryResult<(usize, Vec<LeadEvent>)>;
    }

    impl LeadEventWriter for Repository {
        fn create_lead_event(&self, event: &NewLeadEvent) -> RepositoryResult<LeadEvent>;
    }

    impl JobReader for Repository {
        fn get_job_by_id(&self, id: i32) -> RepositoryResult<Option<InstallationJob>>;
        fn get_job_by_lead_id(&self, lead_id: i32) -> RepositoryResult<Option<InstallationJob>>;
        fn list_jobs(&self, query: JobListQuery) -> RepositoryResult<(usize, Vec<InstallationJob>)>;
        fn latest_job_number_with_prefix(&self, prefix: &str) -> RepositoryResult<Option<String>>;
    }

    impl JobWriter for Repository {
        fn create_job(&self, new_job: &NewInstallationJob) -> RepositoryResult<InstallationJob>;
        fn update_job(
            &self,
            job_id: i32,
            updates: &UpdateInstallationJob,
        ) -> RepositoryResult<InstallationJob>;
    }

    impl ScheduleTokenReader for Repository {
        fn get_schedule_token(&self, token: &str) -> RepositoryResult<Option<ScheduleToken>>;
    }

    impl ScheduleTokenWriter for Repository {
        fn create_schedule_token(
            &self,
            new_token: &NewScheduleToken,
        ) -> RepositoryResult<ScheduleToken>;
        fn mark_schedule_token_used(&self, token_id: i32) -> RepositoryResult<()>;
    }

    impl TeamReader for Repository {
        fn get_team_by_id(&self, id: i32) -> RepositoryResult<Option<Team>>;
        fn list_teams(&self, active_only: bool) -> RepositoryResult<Vec<Team>>;
        fn list_team_members(&self, team_id: i32) -> RepositoryResult<Vec<TeamMember>>;
        fn find_team_for_member(&self, email: &str) -> RepositoryResult<Option<Team>>;
    }

    impl TeamWriter for Repository {
        fn create_team(&self, new_team: &NewTeam) -> RepositoryResult<Team>;
        fn update_team(&self, team_id: i32, updates: &NewTeam) -> RepositoryResult<Team>;
        fn replace_team_members(
            &self,
            team_id: i32,
            members: &[NewTeamMember],
        ) -> RepositoryResult<usize>;
        fn delete_team(&self, team_id: i32) -> RepositoryResult<()>;
    }

    impl CatalogReader for Repository {
        fn get_supplier_by_id(&self, id: i32) -> RepositoryResult<Option<Supplier>>;
        fn list_suppliers(&self, active_only: bool) -> RepositoryResult<Vec<Supplier>>;
        fn get_component_by_id(&self, id: i32) -> RepositoryResult<Option<Component>>;
        fn list_components(&self) -> RepositoryResult<Vec<(Component, Supplier)>>;
    }

    impl CatalogWriter for Repository {
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
        fn adjust_component_stock(
            &self,
            component_id: i32,
            delta: i32,
        ) -> RepositoryResult<Component>;
    }

    impl OrderReader for Repository {
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

    impl OrderWriter for Repository {
        fn create_order(
            &self,
            new_order: &NewMaterialOrder,
            lines: &[NewOrderLine],
        ) -> RepositoryResult<MaterialOrder>;
        fn set_order_status(
            &self,
            order_id: i32,
            status: OrderStatus,
        ) -> RepositoryResult<MaterialOrder>;
    }

    impl HrReader for Repository {
        fn list_positions(&self) -> RepositoryResult<Vec<Position>>;
        fn get_position_by_id(&self, id: i32) -> RepositoryResult<Option<Position>>;
        fn list_vacancies(&self) -> RepositoryResult<Vec<(Vacancy, Position)>>;
        fn get_vacancy_by_id(&self, id: i32) -> RepositoryResult<Option<Vacancy>>;
        fn list_applications(&self, vacancy_id: Option<i32>) -> RepositoryResult<Vec<Application>>;
        fn get_application_by_id(&self, id: i32) -> RepositoryResult<Option<Application>>;
    }

    impl HrWriter for Repository {
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

    impl DocumentReader for Repository {
        fn get_document_by_public_id(
            &self,
            public_id: &PublicId,
        ) -> RepositoryResult<Option<Document>>;
        fn list_documents_for_lead(&self, lead_id: i32) -> RepositoryResult<Vec<Document>>;
        fn list_documents_for_job(&self, job_id: i32) -> RepositoryResult<Vec<Document>>;
    }

    impl DocumentWriter for Repository {
        fn create_document(&self, new_document: &NewDocument) -> RepositoryResult<Document>;
    }

    impl BlogReader for Repository {
        fn list_blog_posts(&self, published_only: bool) -> RepositoryResult<Vec<BlogPost>>;
        fn get_blog_post_by_id(&self, id: i32) -> RepositoryResult<Option<BlogPost>>;
        fn get_blog_post_by_slug(&self, slug: &str) -> RepositoryResult<Option<BlogPost>>;
    }

    impl BlogWriter for Repository {
        fn create_blog_post(&self, new_post: &NewBlogPost) -> RepositoryResult<BlogPost>;
        fn update_blog_post(
            &self,
            post_id: i32,
            updates: &UpdateBlogPost,
        ) -> RepositoryResult<BlogPost>;
        fn delete_blog_post(&self, post_id: i32) -> RepositoryResult<()>;
    }

    impl NotificationReader for Repository {
        fn list_pending_notifications(
            &self,
            limit: usize,
        ) -> RepositoryResult<Vec<EmailNotification>>;
    }

    impl NotificationWriter for Repository {
        fn enqueue_notification(
            &self,
            notification: &NewEmailNotification,
        ) -> RepositoryResult<EmailNotification>;
        fn mark_notification_sent(&self, id: i32) -> RepositoryResult<()>;
        fn mark_notification_failed(&self, id: i32, error: &str) -> RepositoryResult<()>;
    }
}
