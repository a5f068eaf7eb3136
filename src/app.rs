//! Application state: the active screen, the two form controllers, and the
//! validate -> submit -> outcome -> navigate lifecycle.
//!
//! Key and tick handling here is pure state manipulation; the event loop in
//! `main.rs` owns the terminal and the tokio side of dispatching, and the
//! draw code in `ui.rs` only reads.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

use crate::forms::{Field, FieldAccess, FieldKind, Form};
use crate::gateway::{GatewayError, Outcome};
use crate::models::{InternshipApplication, OfferLetter, WorkMode};
use crate::notify::ToastState;
use crate::validate::{AppField, OfferField, validate_application, validate_offer};

/// How long the success toast lingers on the form before the app returns to
/// the dashboard.
pub const SUCCESS_NAV_DELAY: Duration = Duration::from_secs(2);

const VALIDATION_MESSAGE: &str = "Please fill in all required fields";
const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred. Please try again.";

pub const POSITION_OPTIONS: &[&str] = &[
    "Software Engineering",
    "Data Science",
    "Product Management",
    "Marketing",
    "Design",
    "Business Development",
];

pub const DEPARTMENT_OPTIONS: &[&str] =
    &["Engineering", "Product", "Marketing", "Sales", "HR", "Finance"];

pub const OFFER_TITLE_OPTIONS: &[&str] = &[
    "Software Engineering Intern",
    "Data Science Intern",
    "Product Management Intern",
    "Marketing Intern",
    "Design Intern",
    "Business Development Intern",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    ApplicationForm,
    OfferLetterForm,
}

/// Lifecycle of one form instance. `Submitting` gates dispatch: no edits,
/// no second submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubmitPhase {
    Editing,
    Submitting,
    SuccessPending { navigate_at: Instant },
}

/// A record handed to the event loop for dispatch to the gateway.
#[derive(Debug, Clone)]
pub enum SubmitPayload {
    Application(InternshipApplication),
    Offer(OfferLetter),
}

/// A completed gateway call, delivered back to the app on the next tick.
#[derive(Debug)]
pub enum SubmitResult {
    Application(Result<Outcome<InternshipApplication>, GatewayError>),
    Offer(Result<Outcome<OfferLetter>, GatewayError>),
}

enum FormEvent {
    Handled,
    Back,
    Submit,
}

impl FieldAccess for InternshipApplication {
    type Id = AppField;

    fn get(&self, id: AppField) -> String {
        match id {
            AppField::FirstName => self.personal.first_name.clone(),
            AppField::LastName => self.personal.last_name.clone(),
            AppField::Email => self.personal.email.clone(),
            AppField::Phone => self.personal.phone.clone(),
            AppField::DateOfBirth => self.personal.date_of_birth.clone(),
            AppField::Address => self.personal.address.clone(),
            AppField::University => self.academic.university.clone(),
            AppField::Degree => self.academic.degree.clone(),
            AppField::Major => self.academic.major.clone(),
            AppField::GraduationDate => self.academic.graduation_date.clone(),
            AppField::Gpa => self.academic.gpa.clone(),
            AppField::Position => self.internship.position.clone(),
            AppField::Department => self.internship.department.clone(),
            AppField::StartDate => self.internship.start_date.clone(),
            AppField::Duration => self.internship.duration.clone(),
            AppField::WorkMode => self.internship.work_mode.label().to_string(),
            AppField::CoverLetter => self.extra.cover_letter.clone(),
            // The skill list renders as tags, not as a text value.
            AppField::Skills => String::new(),
            AppField::PreviousExperience => self.extra.previous_experience.clone(),
        }
    }

    fn set(&mut self, id: AppField, value: String) {
        match id {
            AppField::FirstName => self.personal.first_name = value,
            AppField::LastName => self.personal.last_name = value,
            AppField::Email => self.personal.email = value,
            AppField::Phone => self.personal.phone = value,
            AppField::DateOfBirth => self.personal.date_of_birth = value,
            AppField::Address => self.personal.address = value,
            AppField::University => self.academic.university = value,
            AppField::Degree => self.academic.degree = value,
            AppField::Major => self.academic.major = value,
            AppField::GraduationDate => self.academic.graduation_date = value,
            AppField::Gpa => self.academic.gpa = value,
            AppField::Position => self.internship.position = value,
            AppField::Department => self.internship.department = value,
            AppField::StartDate => self.internship.start_date = value,
            AppField::Duration => self.internship.duration = value,
            AppField::WorkMode => {
                if let Some(mode) = WorkMode::ALL.iter().find(|m| m.label() == value) {
                    self.internship.work_mode = *mode;
                }
            }
            AppField::CoverLetter => self.extra.cover_letter = value,
            AppField::Skills => {}
            AppField::PreviousExperience => self.extra.previous_experience = value,
        }
    }
}

impl FieldAccess for OfferLetter {
    type Id = OfferField;

    fn get(&self, id: OfferField) -> String {
        match id {
            OfferField::CandidateName => self.candidate.name.clone(),
            OfferField::CandidateEmail => self.candidate.email.clone(),
            OfferField::CandidateAddress => self.candidate.address.clone(),
            OfferField::Title => self.position.title.clone(),
            OfferField::Department => self.position.department.clone(),
            OfferField::StartDate => self.position.start_date.clone(),
            OfferField::Duration => self.position.duration.clone(),
            OfferField::Stipend => self.position.stipend.clone(),
            OfferField::WorkMode => self.position.work_mode.label().to_string(),
            OfferField::CompanyName => self.company.name.clone(),
            OfferField::CompanyAddress => self.company.address.clone(),
            OfferField::ContactPerson => self.company.contact_person.clone(),
            OfferField::ContactEmail => self.company.contact_email.clone(),
            OfferField::AdditionalTerms => self.additional_terms.clone(),
        }
    }

    fn set(&mut self, id: OfferField, value: String) {
        match id {
            OfferField::CandidateName => self.candidate.name = value,
            OfferField::CandidateEmail => self.candidate.email = value,
            OfferField::CandidateAddress => self.candidate.address = value,
            OfferField::Title => self.position.title = value,
            OfferField::Department => self.position.department = value,
            OfferField::StartDate => self.position.start_date = value,
            OfferField::Duration => self.position.duration = value,
            OfferField::Stipend => self.position.stipend = value,
            OfferField::WorkMode => {
                if let Some(mode) = WorkMode::ALL.iter().find(|m| m.label() == value) {
                    self.position.work_mode = *mode;
                }
            }
            OfferField::CompanyName => self.company.name = value,
            OfferField::CompanyAddress => self.company.address = value,
            OfferField::ContactPerson => self.company.contact_person = value,
            OfferField::ContactEmail => self.company.contact_email = value,
            OfferField::AdditionalTerms => self.additional_terms = value,
        }
    }
}

fn application_fields() -> Vec<Field<AppField>> {
    use AppField as F;
    const PERSONAL: &str = "Personal Information";
    const ACADEMIC: &str = "Academic Information";
    const INTERNSHIP: &str = "Internship Details";
    const ADDITIONAL: &str = "Additional Information";
    vec![
        Field::new(F::FirstName, "First Name", PERSONAL, FieldKind::Text)
            .placeholder("Enter your first name"),
        Field::new(F::LastName, "Last Name", PERSONAL, FieldKind::Text)
            .placeholder("Enter your last name"),
        Field::new(F::Email, "Email", PERSONAL, FieldKind::Text)
            .placeholder("your.email@example.com"),
        Field::new(F::Phone, "Phone", PERSONAL, FieldKind::Text)
            .placeholder("+1 (555) 123-4567"),
        Field::new(F::DateOfBirth, "Date of Birth", PERSONAL, FieldKind::Date)
            .placeholder("YYYY-MM-DD"),
        Field::new(F::Address, "Address", PERSONAL, FieldKind::Text)
            .placeholder("123 Main St, City, State, ZIP"),
        Field::new(F::University, "University", ACADEMIC, FieldKind::Text)
            .placeholder("University Name"),
        Field::new(F::Degree, "Degree", ACADEMIC, FieldKind::Text)
            .placeholder("Bachelor's, Master's, etc."),
        Field::new(F::Major, "Major", ACADEMIC, FieldKind::Text)
            .placeholder("Computer Science, Business, etc."),
        Field::new(
            F::GraduationDate,
            "Expected Graduation Date",
            ACADEMIC,
            FieldKind::Date,
        )
        .placeholder("YYYY-MM-DD"),
        Field::new(F::Gpa, "GPA", ACADEMIC, FieldKind::Text)
            .placeholder("3.8/4.0")
            .optional(),
        Field::new(
            F::Position,
            "Desired Position",
            INTERNSHIP,
            FieldKind::Select(POSITION_OPTIONS),
        ),
        Field::new(
            F::Department,
            "Department",
            INTERNSHIP,
            FieldKind::Select(DEPARTMENT_OPTIONS),
        ),
        Field::new(
            F::StartDate,
            "Preferred Start Date",
            INTERNSHIP,
            FieldKind::Date,
        )
        .placeholder("YYYY-MM-DD"),
        Field::new(F::Duration, "Duration", INTERNSHIP, FieldKind::Text)
            .placeholder("3 months, 6 months, etc."),
        Field::new(F::WorkMode, "Work Mode", INTERNSHIP, FieldKind::WorkModeSelect),
        Field::new(F::CoverLetter, "Cover Letter", ADDITIONAL, FieldKind::Multiline)
            .placeholder("Tell us why you're interested in this internship..."),
        Field::new(F::Skills, "Skills", ADDITIONAL, FieldKind::Skills)
            .placeholder("Add a skill (e.g., JavaScript, Python, Communication)")
            .optional(),
        Field::new(
            F::PreviousExperience,
            "Previous Experience",
            ADDITIONAL,
            FieldKind::Multiline,
        )
        .placeholder("Describe any relevant work experience, projects, or activities...")
        .optional(),
    ]
}

fn offer_fields() -> Vec<Field<OfferField>> {
    use OfferField as F;
    const CANDIDATE: &str = "Candidate Information";
    const POSITION: &str = "Position Details";
    const COMPANY: &str = "Company Information";
    const TERMS: &str = "Additional Terms";
    vec![
        Field::new(F::CandidateName, "Full Name", CANDIDATE, FieldKind::Text)
            .placeholder("John Doe"),
        Field::new(F::CandidateEmail, "Email Address", CANDIDATE, FieldKind::Text)
            .placeholder("john.doe@example.com"),
        Field::new(F::CandidateAddress, "Address", CANDIDATE, FieldKind::Text)
            .placeholder("123 Main St, City, State, ZIP"),
        Field::new(
            F::Title,
            "Position Title",
            POSITION,
            FieldKind::Select(OFFER_TITLE_OPTIONS),
        ),
        Field::new(
            F::Department,
            "Department",
            POSITION,
            FieldKind::Select(DEPARTMENT_OPTIONS),
        ),
        Field::new(F::StartDate, "Start Date", POSITION, FieldKind::Date)
            .placeholder("YYYY-MM-DD"),
        Field::new(F::Duration, "Duration", POSITION, FieldKind::Text)
            .placeholder("3 months, 6 months, etc."),
        Field::new(F::Stipend, "Monthly Stipend", POSITION, FieldKind::Text)
            .placeholder("$2,000, $3,500, etc."),
        Field::new(F::WorkMode, "Work Mode", POSITION, FieldKind::WorkModeSelect),
        Field::new(F::CompanyName, "Company Name", COMPANY, FieldKind::Text)
            .placeholder("Company Inc."),
        Field::new(F::CompanyAddress, "Company Address", COMPANY, FieldKind::Text)
            .placeholder("456 Business Ave, City, State, ZIP"),
        Field::new(F::ContactPerson, "Contact Person", COMPANY, FieldKind::Text)
            .placeholder("Jane Smith"),
        Field::new(F::ContactEmail, "Contact Email", COMPANY, FieldKind::Text)
            .placeholder("jane.smith@company.com"),
        Field::new(F::AdditionalTerms, "Additional Terms", TERMS, FieldKind::Multiline)
            .placeholder("Any additional terms or conditions...")
            .optional(),
    ]
}

/// Controller for the internship application screen. Owns the in-progress
/// record for the lifetime of the screen.
#[derive(Debug)]
pub struct ApplicationForm {
    pub record: InternshipApplication,
    pub form: Form<AppField>,
    pub phase: SubmitPhase,
}

impl ApplicationForm {
    pub fn new() -> Self {
        Self {
            record: InternshipApplication::default(),
            form: Form::new(application_fields()),
            phase: SubmitPhase::Editing,
        }
    }

    fn on_skills_field(&self) -> bool {
        matches!(
            self.form.focused_field(),
            Some(field) if field.kind == FieldKind::Skills
        )
    }

    fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
        // The skills field intercepts Enter (add tag) and Backspace on an
        // empty buffer (drop the newest tag) before the generic handling.
        if self.on_skills_field() {
            match key.code {
                KeyCode::Enter
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !self.skills_buffer().trim().is_empty() =>
                {
                    let entry = self.skills_buffer().to_string();
                    if self.record.extra.add_skill(&entry) {
                        self.clear_skills_buffer();
                    }
                    return FormEvent::Handled;
                }
                KeyCode::Backspace => {
                    if !self.form.backspace(&mut self.record) {
                        if let Some(last) = self.record.extra.skills.last().cloned() {
                            self.record.extra.remove_skill(&last);
                        }
                    }
                    return FormEvent::Handled;
                }
                _ => {}
            }
        }
        handle_form_key(&mut self.form, &mut self.record, key)
    }

    fn skills_buffer(&self) -> &str {
        self.form
            .fields
            .iter()
            .find(|f| f.kind == FieldKind::Skills)
            .map(|f| f.buffer.as_str())
            .unwrap_or("")
    }

    fn clear_skills_buffer(&mut self) {
        if let Some(field) = self
            .form
            .fields
            .iter_mut()
            .find(|f| f.kind == FieldKind::Skills)
        {
            field.buffer.clear();
            field.cursor = 0;
        }
    }
}

/// Controller for the offer-letter screen.
#[derive(Debug)]
pub struct OfferForm {
    pub record: OfferLetter,
    pub form: Form<OfferField>,
    pub phase: SubmitPhase,
}

impl OfferForm {
    pub fn new() -> Self {
        Self {
            record: OfferLetter::default(),
            form: Form::new(offer_fields()),
            phase: SubmitPhase::Editing,
        }
    }
}

fn is_select<F: Copy + Eq>(form: &Form<F>) -> bool {
    matches!(
        form.focused_field(),
        Some(field) if matches!(field.kind, FieldKind::Select(_) | FieldKind::WorkModeSelect)
    )
}

fn handle_form_key<F, R>(form: &mut Form<F>, record: &mut R, key: KeyEvent) -> FormEvent
where
    F: Copy + Eq,
    R: FieldAccess<Id = F>,
{
    match key.code {
        KeyCode::Esc => return FormEvent::Back,
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return FormEvent::Submit;
        }
        KeyCode::F(10) => return FormEvent::Submit,
        KeyCode::Enter if form.submit_focused => return FormEvent::Submit,
        KeyCode::Enter => {
            if is_select(form) {
                form.cycle_select(record, 1);
            } else {
                form.next_field();
            }
        }
        KeyCode::BackTab => form.prev_field(),
        KeyCode::Tab => form.next_field(),
        KeyCode::Up => form.prev_field(),
        KeyCode::Down => form.next_field(),
        KeyCode::Left => {
            if is_select(form) {
                form.cycle_select(record, -1);
            } else {
                form.cursor_left(record);
            }
        }
        KeyCode::Right => {
            if is_select(form) {
                form.cycle_select(record, 1);
            } else {
                form.cursor_right(record);
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.insert_char(record, c);
        }
        KeyCode::Backspace => {
            form.backspace(record);
        }
        _ => {}
    }
    FormEvent::Handled
}

/// Resolve a gateway result against one controller's phase. A result that
/// arrives in any phase but `Submitting` is stale and ignored.
fn resolve_outcome<T>(
    phase: &mut SubmitPhase,
    record: &mut T,
    toast: &mut ToastState,
    result: Result<Outcome<T>, GatewayError>,
    now: Instant,
) {
    if *phase != SubmitPhase::Submitting {
        return;
    }
    match result {
        Ok(Outcome::Accepted { data, message }) => {
            *record = data;
            toast.success(message, now);
            *phase = SubmitPhase::SuccessPending {
                navigate_at: now + SUCCESS_NAV_DELAY,
            };
        }
        Ok(Outcome::Rejected { message, .. }) => {
            toast.error(message, now);
            *phase = SubmitPhase::Editing;
        }
        Err(_) => {
            toast.error(UNEXPECTED_MESSAGE, now);
            *phase = SubmitPhase::Editing;
        }
    }
}

/// Top-level state: current screen, per-screen form state, and the toast.
pub struct App {
    pub screen: Screen,
    pub toast: ToastState,
    pub should_quit: bool,
    pub application: Option<ApplicationForm>,
    pub offer: Option<OfferForm>,
}

impl App {
    pub fn new() -> Self {
        Self {
            screen: Screen::Dashboard,
            toast: ToastState::new(),
            should_quit: false,
            application: None,
            offer: None,
        }
    }

    /// Switch screens. Form state is created on entry and dropped on exit,
    /// so leaving a form discards its record.
    pub fn go_to(&mut self, screen: Screen) {
        self.application = None;
        self.offer = None;
        match screen {
            Screen::Dashboard => {}
            Screen::ApplicationForm => self.application = Some(ApplicationForm::new()),
            Screen::OfferLetterForm => self.offer = Some(OfferForm::new()),
        }
        self.screen = screen;
    }

    fn back_to_dashboard(&mut self) {
        self.go_to(Screen::Dashboard);
    }

    /// Whether a submission is currently in flight on the active screen.
    pub fn submitting(&self) -> bool {
        let phase = match self.screen {
            Screen::ApplicationForm => self.application.as_ref().map(|f| f.phase),
            Screen::OfferLetterForm => self.offer.as_ref().map(|f| f.phase),
            Screen::Dashboard => None,
        };
        !matches!(phase, None | Some(SubmitPhase::Editing))
    }

    /// Handle one key press. Returns a payload when a valid submission
    /// should be dispatched to the gateway.
    pub fn on_key(&mut self, key: KeyEvent, now: Instant) -> Option<SubmitPayload> {
        // Esc acknowledges a visible toast before anything else.
        if key.code == KeyCode::Esc && self.toast.visible().is_some() {
            self.toast.dismiss();
            return None;
        }

        // While a submission is in flight (or the post-success navigation is
        // pending) the form is inert.
        if self.submitting() {
            return None;
        }

        match self.screen {
            Screen::Dashboard => {
                match key.code {
                    KeyCode::Char('a') | KeyCode::Char('1') => self.go_to(Screen::ApplicationForm),
                    KeyCode::Char('o') | KeyCode::Char('2') => self.go_to(Screen::OfferLetterForm),
                    KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                    _ => {}
                }
                None
            }
            Screen::ApplicationForm => {
                let event = self.application.as_mut()?.handle_key(key);
                match event {
                    FormEvent::Back => {
                        self.back_to_dashboard();
                        None
                    }
                    FormEvent::Submit => self.submit_application(now),
                    FormEvent::Handled => None,
                }
            }
            Screen::OfferLetterForm => {
                let controller = self.offer.as_mut()?;
                let event = handle_form_key(&mut controller.form, &mut controller.record, key);
                match event {
                    FormEvent::Back => {
                        self.back_to_dashboard();
                        None
                    }
                    FormEvent::Submit => self.submit_offer(now),
                    FormEvent::Handled => None,
                }
            }
        }
    }

    fn submit_application(&mut self, now: Instant) -> Option<SubmitPayload> {
        let controller = self.application.as_mut()?;
        if controller.phase != SubmitPhase::Editing {
            return None;
        }
        let errors = validate_application(&controller.record);
        if !errors.is_empty() {
            controller.form.apply_errors(&errors);
            self.toast.error(VALIDATION_MESSAGE, now);
            return None;
        }
        controller.form.clear_errors();
        controller.phase = SubmitPhase::Submitting;
        Some(SubmitPayload::Application(controller.record.clone()))
    }

    fn submit_offer(&mut self, now: Instant) -> Option<SubmitPayload> {
        let controller = self.offer.as_mut()?;
        if controller.phase != SubmitPhase::Editing {
            return None;
        }
        let errors = validate_offer(&controller.record);
        if !errors.is_empty() {
            controller.form.apply_errors(&errors);
            self.toast.error(VALIDATION_MESSAGE, now);
            return None;
        }
        controller.form.clear_errors();
        controller.phase = SubmitPhase::Submitting;
        Some(SubmitPayload::Offer(controller.record.clone()))
    }

    /// Apply a completed gateway call.
    pub fn on_outcome(&mut self, result: SubmitResult, now: Instant) {
        match result {
            SubmitResult::Application(result) => {
                if let Some(controller) = self.application.as_mut() {
                    resolve_outcome(
                        &mut controller.phase,
                        &mut controller.record,
                        &mut self.toast,
                        result,
                        now,
                    );
                }
            }
            SubmitResult::Offer(result) => {
                if let Some(controller) = self.offer.as_mut() {
                    resolve_outcome(
                        &mut controller.phase,
                        &mut controller.record,
                        &mut self.toast,
                        result,
                        now,
                    );
                }
            }
        }
    }

    /// Advance time-driven state: toast expiry and the post-success return
    /// to the dashboard.
    pub fn on_tick(&mut self, now: Instant) {
        self.toast.tick(now);

        let navigate = match self.screen {
            Screen::ApplicationForm => matches!(
                self.application.as_ref().map(|f| f.phase),
                Some(SubmitPhase::SuccessPending { navigate_at }) if now >= navigate_at
            ),
            Screen::OfferLetterForm => matches!(
                self.offer.as_ref().map(|f| f.phase),
                Some(SubmitPhase::SuccessPending { navigate_at }) if now >= navigate_at
            ),
            Screen::Dashboard => false,
        };
        if navigate {
            self.back_to_dashboard();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{TOAST_DURATION, ToastKind};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn submit_key() -> KeyEvent {
        KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL)
    }

    fn filled_application() -> InternshipApplication {
        let mut record = InternshipApplication::default();
        record.personal.first_name = "Ada".into();
        record.personal.last_name = "Lovelace".into();
        record.personal.email = "ada@example.com".into();
        record.personal.phone = "+1 (555) 123-4567".into();
        record.personal.date_of_birth = "2003-12-10".into();
        record.personal.address = "12 Analytical Way".into();
        record.academic.university = "University of London".into();
        record.academic.degree = "Bachelor's".into();
        record.academic.major = "Mathematics".into();
        record.academic.graduation_date = "2026-06-30".into();
        record.internship.position = "Software Engineering".into();
        record.internship.department = "Engineering".into();
        record.internship.start_date = "2026-09-01".into();
        record.internship.duration = "6 months".into();
        record.extra.cover_letter = "I would like to build engines.".into();
        record
    }

    fn filled_offer() -> OfferLetter {
        let mut record = OfferLetter::default();
        record.candidate.name = "Ada Lovelace".into();
        record.candidate.email = "ada@example.com".into();
        record.candidate.address = "12 Analytical Way".into();
        record.position.title = "Software Engineering Intern".into();
        record.position.department = "Engineering".into();
        record.position.start_date = "2026-09-01".into();
        record.position.duration = "6 months".into();
        record.position.stipend = "$2,000".into();
        record.company.name = "Difference Engines Ltd".into();
        record.company.address = "1 Babbage Square".into();
        record.company.contact_person = "Charles Babbage".into();
        record.company.contact_email = "charles@example.com".into();
        record
    }

    fn app_on_application_form() -> App {
        let mut app = App::new();
        app.go_to(Screen::ApplicationForm);
        app.application.as_mut().unwrap().record = filled_application();
        app
    }

    fn app_on_offer_form() -> App {
        let mut app = App::new();
        app.go_to(Screen::OfferLetterForm);
        app.offer.as_mut().unwrap().record = filled_offer();
        app
    }

    #[test]
    fn test_initial_screen_is_dashboard() {
        let app = App::new();
        assert_eq!(app.screen, Screen::Dashboard);
    }

    #[test]
    fn test_dashboard_keys_navigate_to_forms() {
        let now = Instant::now();
        let mut app = App::new();
        app.on_key(key(KeyCode::Char('a')), now);
        assert_eq!(app.screen, Screen::ApplicationForm);
        assert!(app.application.is_some());

        app.on_key(key(KeyCode::Esc), now);
        assert_eq!(app.screen, Screen::Dashboard);
        assert!(app.application.is_none());

        app.on_key(key(KeyCode::Char('o')), now);
        assert_eq!(app.screen, Screen::OfferLetterForm);
        assert!(app.offer.is_some());
    }

    #[test]
    fn test_invalid_submit_blocks_and_reports_every_missing_field() {
        let now = Instant::now();
        let mut app = App::new();
        app.go_to(Screen::ApplicationForm);

        let payload = app.on_key(submit_key(), now);
        assert!(payload.is_none());

        let controller = app.application.as_ref().unwrap();
        assert_eq!(controller.phase, SubmitPhase::Editing);
        assert!(controller.form.error_for(AppField::Email).is_some());
        assert!(controller.form.error_for(AppField::CoverLetter).is_some());
        // Optional fields stay clean.
        assert!(controller.form.error_for(AppField::Gpa).is_none());

        let toast = app.toast.visible().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.text, VALIDATION_MESSAGE);
    }

    #[test]
    fn test_editing_a_field_clears_its_error_immediately() {
        let now = Instant::now();
        let mut app = App::new();
        app.go_to(Screen::ApplicationForm);
        app.on_key(submit_key(), now);

        let controller = app.application.as_mut().unwrap();
        assert!(controller.form.error_for(AppField::Email).is_some());
        let email_idx = controller
            .form
            .fields
            .iter()
            .position(|f| f.id == AppField::Email)
            .unwrap();
        controller.form.focused = email_idx;
        controller.form.submit_focused = false;

        app.on_key(key(KeyCode::Char('a')), now);
        let controller = app.application.as_ref().unwrap();
        assert!(controller.form.error_for(AppField::Email).is_none());
        // Other errors are untouched until the next submit attempt.
        assert!(controller.form.error_for(AppField::Phone).is_some());
        assert_eq!(controller.record.personal.email, "a");
    }

    #[test]
    fn test_valid_submit_dispatches_exactly_once() {
        let now = Instant::now();
        let mut app = app_on_application_form();

        let first = app.on_key(submit_key(), now);
        assert!(matches!(first, Some(SubmitPayload::Application(_))));
        assert_eq!(
            app.application.as_ref().unwrap().phase,
            SubmitPhase::Submitting
        );

        // Second submit while in flight must not reach the gateway.
        let second = app.on_key(submit_key(), now);
        assert!(second.is_none());
        let third = app.on_key(key(KeyCode::F(10)), now);
        assert!(third.is_none());
    }

    #[test]
    fn test_success_path_toasts_then_navigates_home() {
        let now = Instant::now();
        let mut app = app_on_application_form();

        let payload = app.on_key(submit_key(), now).unwrap();
        let SubmitPayload::Application(mut record) = payload else {
            panic!("wrong payload kind");
        };
        record.id = Some("1754000000000".into());

        app.on_outcome(
            SubmitResult::Application(Ok(Outcome::Accepted {
                data: record,
                message: "Operation completed successfully!".into(),
            })),
            now,
        );

        let toast = app.toast.visible().unwrap();
        assert_eq!(toast.kind, ToastKind::Success);
        assert_eq!(toast.text, "Operation completed successfully!");
        assert_eq!(app.screen, Screen::ApplicationForm);
        assert_eq!(
            app.application.as_ref().unwrap().record.id.as_deref(),
            Some("1754000000000")
        );

        // Still on the form just before the delay elapses.
        app.on_tick(now + SUCCESS_NAV_DELAY - Duration::from_millis(1));
        assert_eq!(app.screen, Screen::ApplicationForm);

        app.on_tick(now + SUCCESS_NAV_DELAY);
        assert_eq!(app.screen, Screen::Dashboard);
        assert!(app.application.is_none());
    }

    #[test]
    fn test_failure_path_preserves_entered_data() {
        let now = Instant::now();
        let mut app = app_on_offer_form();

        let payload = app.on_key(submit_key(), now);
        assert!(matches!(payload, Some(SubmitPayload::Offer(_))));

        app.on_outcome(
            SubmitResult::Offer(Ok(Outcome::Rejected {
                message: "X".into(),
                detail: None,
            })),
            now,
        );

        let toast = app.toast.visible().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.text, "X");
        assert_eq!(app.screen, Screen::OfferLetterForm);

        let controller = app.offer.as_ref().unwrap();
        assert_eq!(controller.phase, SubmitPhase::Editing);
        assert_eq!(controller.record, filled_offer());

        // The user can immediately retry.
        let retry = app.on_key(submit_key(), now);
        assert!(matches!(retry, Some(SubmitPayload::Offer(_))));
    }

    #[test]
    fn test_transport_fault_behaves_like_rejection() {
        let now = Instant::now();
        let mut app = app_on_offer_form();
        app.on_key(submit_key(), now);

        app.on_outcome(
            SubmitResult::Offer(Err(GatewayError::MissingData)),
            now,
        );

        let toast = app.toast.visible().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.text, UNEXPECTED_MESSAGE);
        assert_eq!(app.offer.as_ref().unwrap().phase, SubmitPhase::Editing);
        assert_eq!(app.screen, Screen::OfferLetterForm);
    }

    #[test]
    fn test_back_discards_in_progress_record() {
        let now = Instant::now();
        let mut app = app_on_application_form();
        app.on_key(key(KeyCode::Esc), now);
        assert_eq!(app.screen, Screen::Dashboard);

        app.on_key(key(KeyCode::Char('a')), now);
        let controller = app.application.as_ref().unwrap();
        assert_eq!(controller.record, InternshipApplication::default());
    }

    #[test]
    fn test_esc_dismisses_toast_before_navigating_back() {
        let now = Instant::now();
        let mut app = App::new();
        app.go_to(Screen::ApplicationForm);
        app.on_key(submit_key(), now); // invalid -> error toast
        assert!(app.toast.visible().is_some());

        app.on_key(key(KeyCode::Esc), now);
        assert!(app.toast.visible().is_none());
        assert_eq!(app.screen, Screen::ApplicationForm);

        app.on_key(key(KeyCode::Esc), now);
        assert_eq!(app.screen, Screen::Dashboard);
    }

    #[test]
    fn test_toast_expires_via_tick() {
        let now = Instant::now();
        let mut app = App::new();
        app.go_to(Screen::ApplicationForm);
        app.on_key(submit_key(), now);
        assert!(app.toast.visible().is_some());

        app.on_tick(now + TOAST_DURATION);
        assert!(app.toast.visible().is_none());
    }

    #[test]
    fn test_skills_keys_add_and_pop_tags() {
        let now = Instant::now();
        let mut app = App::new();
        app.go_to(Screen::ApplicationForm);
        let controller = app.application.as_mut().unwrap();
        let skills_idx = controller
            .form
            .fields
            .iter()
            .position(|f| f.kind == FieldKind::Skills)
            .unwrap();
        controller.form.focused = skills_idx;

        for c in "Rust".chars() {
            app.on_key(key(KeyCode::Char(c)), now);
        }
        app.on_key(key(KeyCode::Enter), now);
        let controller = app.application.as_ref().unwrap();
        assert_eq!(controller.record.extra.skills, vec!["Rust"]);
        assert_eq!(controller.skills_buffer(), "");

        // Duplicate entry is a no-op and keeps the buffer for correction.
        for c in "Rust".chars() {
            app.on_key(key(KeyCode::Char(c)), now);
        }
        app.on_key(key(KeyCode::Enter), now);
        let controller = app.application.as_ref().unwrap();
        assert_eq!(controller.record.extra.skills, vec!["Rust"]);
        assert_eq!(controller.skills_buffer(), "Rust");

        // Clear the buffer, then Backspace pops the newest tag.
        for _ in 0..4 {
            app.on_key(key(KeyCode::Backspace), now);
        }
        assert_eq!(app.application.as_ref().unwrap().skills_buffer(), "");
        app.on_key(key(KeyCode::Backspace), now);
        assert!(app.application.as_ref().unwrap().record.extra.skills.is_empty());
    }

    #[test]
    fn test_duplicate_outcome_is_ignored() {
        let now = Instant::now();
        let mut app = app_on_offer_form();
        app.on_key(submit_key(), now);
        // The first result resolves the phase back to Editing; a stray
        // second result must not toast again.
        app.on_outcome(
            SubmitResult::Offer(Ok(Outcome::Rejected {
                message: "X".into(),
                detail: None,
            })),
            now,
        );
        app.toast.dismiss();
        app.on_outcome(
            SubmitResult::Offer(Ok(Outcome::Rejected {
                message: "Y".into(),
                detail: None,
            })),
            now,
        );
        assert!(app.toast.visible().is_none());
    }
}
