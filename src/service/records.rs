use crate::config::{
    CONDITIONS_MAX_LEN, CONTACT_MAX_LEN, Config, DATE_FORMAT_HINT, NAME_MAX_LEN,
};
use crate::db::{Driver, DriverRecord, Route, RouteRecord, RosterStorage, Student, StudentRecord};
use crate::error::RosterError;
use crate::types::forms::{DriverForm, OverrideForm, RouteForm, StudentForm};
use crate::types::views::{
    DetailView, DriverEditView, DriverFormView, DriverListView, DriverRoutes, RosterView,
    RouteDetail, RouteEditView, RouteFormView, RouteListView, StudentDetail, StudentEditView,
    StudentFormView, StudentListView, index_by_id,
};
use tracing::{debug, info};

/// Record operations for students, routes and drivers.
///
/// Parses raw forms into validated records, delegates persistence to
/// [`RosterStorage`] and assembles the views the pages need.
#[derive(Clone)]
pub struct RecordService {
    storage: RosterStorage,
}

impl RecordService {
    pub fn new(storage: RosterStorage) -> Self {
        Self { storage }
    }

    pub async fn connect(cfg: &Config) -> Result<Self, RosterError> {
        let storage = RosterStorage::connect(&cfg.database_url, cfg.max_connections).await?;
        Ok(Self::new(storage))
    }

    // ---- students ----

    pub async fn list_students(&self) -> Result<StudentListView, RosterError> {
        let students = self.storage.list_students().await?;
        let routes = index_by_id(self.storage.list_routes().await?, |r| r.id);
        Ok(StudentListView { students, routes })
    }

    pub async fn get_student(&self, id: i64) -> Result<Student, RosterError> {
        self.storage
            .get_student(id)
            .await?
            .ok_or_else(|| RosterError::not_found("Student", id))
    }

    pub async fn student_detail(&self, id: i64) -> Result<DetailView<StudentDetail>, RosterError> {
        Ok(match self.storage.get_student(id).await? {
            Some(student) => DetailView::Found(StudentDetail { student }),
            None => DetailView::empty("student", id),
        })
    }

    pub async fn student_form(&self) -> Result<StudentFormView, RosterError> {
        Ok(StudentFormView {
            routes: self.storage.list_routes().await?,
        })
    }

    pub async fn student_for_edit(&self, id: i64) -> Result<StudentEditView, RosterError> {
        let student = self.get_student(id).await?;
        let routes = self.storage.list_routes().await?;
        Ok(StudentEditView { student, routes })
    }

    pub async fn create_student(&self, form: StudentForm) -> Result<Student, RosterError> {
        debug!(form = ?form, "create student");
        let rec = StudentRecord::try_from(form)?;
        let student = self.storage.insert_student(&rec).await?;
        info!(student_id = student.id, route_id = ?student.route_id, "student created");
        Ok(student)
    }

    /// Full overwrite; the student is taken off the bus.
    pub async fn update_student(&self, id: i64, form: StudentForm) -> Result<Student, RosterError> {
        debug!(student_id = id, form = ?form, "update student");
        let rec = StudentRecord::try_from(form)?;
        let student = self.storage.update_student(id, &rec).await?;
        info!(student_id = id, route_id = ?student.route_id, "student updated");
        Ok(student)
    }

    pub async fn delete_student(&self, id: i64) -> Result<(), RosterError> {
        self.storage.delete_student(id).await?;
        info!(student_id = id, "student deleted");
        Ok(())
    }

    pub async fn toggle_boarding(&self, id: i64) -> Result<Student, RosterError> {
        let student = self.storage.toggle_boarding(id).await?;
        info!(student_id = id, on_bus = student.on_bus, "boarding status changed");
        Ok(student)
    }

    pub async fn offload_route(&self, route_id: i64) -> Result<u64, RosterError> {
        let count = self.storage.offload_route(route_id).await?;
        info!(route_id, count, "route offloaded");
        Ok(count)
    }

    pub async fn reassign_student(
        &self,
        route_id: i64,
        form: OverrideForm,
    ) -> Result<Student, RosterError> {
        let student_id = form.student_id()?;
        let student = self.storage.reassign_student(student_id, route_id).await?;
        info!(student_id, route_id, "student reassigned");
        Ok(student)
    }

    // ---- routes ----

    pub async fn list_routes(&self) -> Result<RouteListView, RosterError> {
        let routes = self.storage.list_routes().await?;
        let drivers = index_by_id(self.storage.list_drivers().await?, |d| d.id);
        let driver_routes = DriverRoutes::from_routes(&routes);
        Ok(RouteListView {
            routes,
            drivers,
            driver_routes,
        })
    }

    /// Routes in number order for the operator landing page.
    pub async fn operator_routes(&self) -> Result<Vec<Route>, RosterError> {
        self.storage.list_routes().await
    }

    pub async fn route_detail(&self, id: i64) -> Result<DetailView<RouteDetail>, RosterError> {
        let Some(route) = self.storage.get_route(id).await? else {
            return Ok(DetailView::empty("route", id));
        };
        let students = self.storage.list_students_on_route(id).await?;
        let drivers = index_by_id(self.storage.list_drivers().await?, |d| d.id);
        Ok(DetailView::Found(RouteDetail {
            route,
            students,
            drivers,
        }))
    }

    pub async fn roster(&self, id: i64) -> Result<RosterView, RosterError> {
        let route = self
            .storage
            .get_route(id)
            .await?
            .ok_or_else(|| RosterError::not_found("Route", id))?;
        let students = self.storage.list_students_on_route(id).await?;
        let all_students = self.storage.list_students().await?;
        let representative = students.first().cloned();
        Ok(RosterView {
            route,
            students,
            all_students,
            representative,
        })
    }

    pub async fn route_form(&self) -> Result<RouteFormView, RosterError> {
        let drivers = self.storage.list_drivers().await?;
        let routes = self.storage.list_routes().await?;
        Ok(RouteFormView {
            drivers,
            driver_routes: DriverRoutes::from_routes(&routes),
        })
    }

    pub async fn route_for_edit(&self, id: i64) -> Result<RouteEditView, RosterError> {
        let route = self
            .storage
            .get_route(id)
            .await?
            .ok_or_else(|| RosterError::not_found("Route", id))?;
        let drivers = self.storage.list_drivers().await?;
        Ok(RouteEditView { route, drivers })
    }

    pub async fn create_route(&self, form: RouteForm) -> Result<Route, RosterError> {
        let rec = RouteRecord::try_from(form)?;
        let route = self.storage.insert_route(&rec).await?;
        info!(
            route_id = route.id,
            number = route.route,
            driver_id = ?route.driver_id,
            "route created"
        );
        Ok(route)
    }

    pub async fn update_route(&self, id: i64, form: RouteForm) -> Result<Route, RosterError> {
        let rec = RouteRecord::try_from(form)?;
        let route = self.storage.update_route(id, &rec).await?;
        info!(route_id = id, number = route.route, driver_id = ?route.driver_id, "route updated");
        Ok(route)
    }

    pub async fn delete_route(&self, id: i64) -> Result<(), RosterError> {
        self.storage.delete_route(id).await?;
        info!(route_id = id, "route deleted");
        Ok(())
    }

    // ---- drivers ----

    pub async fn list_drivers(&self) -> Result<DriverListView, RosterError> {
        let drivers = self.storage.list_drivers().await?;
        let routes = self.storage.list_routes().await?;
        Ok(DriverListView {
            drivers,
            driver_routes: DriverRoutes::from_routes(&routes),
        })
    }

    pub fn driver_form(&self) -> DriverFormView {
        DriverFormView {
            dob_format: DATE_FORMAT_HINT,
            name_max_len: NAME_MAX_LEN,
            conditions_max_len: CONDITIONS_MAX_LEN,
            contact_max_len: CONTACT_MAX_LEN,
        }
    }

    pub async fn get_driver(&self, id: i64) -> Result<Driver, RosterError> {
        self.storage
            .get_driver(id)
            .await?
            .ok_or_else(|| RosterError::not_found("Driver", id))
    }

    pub async fn driver_for_edit(&self, id: i64) -> Result<DriverEditView, RosterError> {
        Ok(DriverEditView {
            driver: self.get_driver(id).await?,
        })
    }

    pub async fn create_driver(&self, form: DriverForm) -> Result<Driver, RosterError> {
        let rec = DriverRecord::try_from(form)?;
        let driver = self.storage.insert_driver(&rec).await?;
        info!(driver_id = driver.id, "driver created");
        Ok(driver)
    }

    pub async fn update_driver(&self, id: i64, form: DriverForm) -> Result<Driver, RosterError> {
        let rec = DriverRecord::try_from(form)?;
        let driver = self.storage.update_driver(id, &rec).await?;
        info!(driver_id = id, "driver updated");
        Ok(driver)
    }

    pub async fn delete_driver(&self, id: i64) -> Result<(), RosterError> {
        self.storage.delete_driver(id).await?;
        info!(driver_id = id, "driver deleted");
        Ok(())
    }
}
