use tracing::{debug, instrument};

use appointment_cell::services::AppointmentQueryService;
use catalog_cell::services::CatalogService;
use shared_models::auth::{Role, Session};
use shared_models::error::AppError;
use shared_utils::state::AppState;

use crate::models::{AdminDashboard, Dashboard, DoctorDashboard, PatientDashboard, RECENT_APPOINTMENT_LIMIT};

pub struct DashboardService {
    appointments: AppointmentQueryService,
    catalog: CatalogService,
}

impl DashboardService {
    pub fn new(state: &AppState) -> Self {
        Self {
            appointments: AppointmentQueryService::new(state),
            catalog: CatalogService::new(state),
        }
    }

    #[instrument(skip(self, session), fields(user_id = session.user_id, role = %session.role))]
    pub async fn dashboard_for(&self, session: &Session) -> Result<Dashboard, AppError> {
        let dashboard = match session.role {
            Role::Admin => Dashboard::Admin(self.admin_dashboard().await?),
            Role::Doctor => Dashboard::Doctor(DoctorDashboard {
                appointments: self.appointments.appointments_for_doctor(session.user_id).await?,
            }),
            Role::Patient => Dashboard::Patient(PatientDashboard {
                appointments: self.appointments.appointments_for_patient(session.user_id).await?,
                departments: self.catalog.list_departments().await?,
                treatments: self.catalog.list_treatments().await?,
            }),
        };

        debug!("Built {} dashboard", session.role);
        Ok(dashboard)
    }

    async fn admin_dashboard(&self) -> Result<AdminDashboard, AppError> {
        let counts = self.appointments.counts().await?;
        let recent_appointments = self
            .appointments
            .recent_appointments(RECENT_APPOINTMENT_LIMIT)
            .await?;

        Ok(AdminDashboard {
            user_count: counts.user_count,
            appointment_count: counts.appointment_count,
            department_count: counts.department_count,
            recent_appointments,
        })
    }
}
