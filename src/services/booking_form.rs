use std::sync::Arc;

use chrono::NaiveDate;

use crate::models::{
    format_visit_date, BookingSelection, Catalog, Field, FormError, FormState, SubmissionRequest,
};
use crate::services::clock::Clock;

/// Receives the selection after every accepted change.
pub trait FormObserver: Send + Sync {
    fn on_change(&self, selection: &BookingSelection, state: FormState);
}

/// Logs form changes; attached to every session the service creates.
pub struct TracingObserver {
    pub session_id: String,
}

impl FormObserver for TracingObserver {
    fn on_change(&self, selection: &BookingSelection, state: FormState) {
        tracing::debug!(
            session = %self.session_id,
            state = state.as_str(),
            monument = ?selection.monument,
            visit_date = ?selection.visit_date_display,
            slot = ?selection.slot,
            nationality = ?selection.nationality,
            "booking form changed"
        );
    }
}

/// Owns one [`BookingSelection`] and gates its submission.
///
/// The form is `Incomplete` until all four fields hold catalog values and the
/// date is not in the past, at which point it is `Ready`. A date that was valid
/// when chosen drops the form back to `Incomplete` once the day has passed.
/// Rejected operations leave the selection untouched.
pub struct BookingFormController {
    catalog: Arc<Catalog>,
    clock: Arc<dyn Clock>,
    selection: BookingSelection,
    observers: Vec<Box<dyn FormObserver>>,
}

impl BookingFormController {
    pub fn new(catalog: Arc<Catalog>, clock: Arc<dyn Clock>) -> Self {
        Self {
            catalog,
            clock,
            selection: BookingSelection::default(),
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn FormObserver>) {
        self.observers.push(observer);
    }

    pub fn selection(&self) -> &BookingSelection {
        &self.selection
    }

    /// `Ready` exactly when [`submit`](Self::submit) would succeed.
    pub fn state(&self) -> FormState {
        if self.missing_fields().is_empty() {
            FormState::Ready
        } else {
            FormState::Incomplete
        }
    }

    /// Unset fields, plus `visitDate` once the selected day has passed.
    pub fn missing_fields(&self) -> Vec<Field> {
        let mut missing = self.selection.missing_fields();
        if self.date_is_stale() {
            missing.push(Field::VisitDate);
            missing.sort_by_key(|f| Field::ALL.iter().position(|a| a == f));
        }
        missing
    }

    fn date_is_stale(&self) -> bool {
        self.selection
            .visit_date
            .is_some_and(|date| date < self.clock.today())
    }

    pub fn select_monument(&mut self, name: &str) -> Result<FormState, FormError> {
        if !self.catalog.has_monument(name) {
            return Err(invalid(Field::Monument, name));
        }
        let changed = set_text(&mut self.selection.monument, name);
        Ok(self.after_change(changed))
    }

    pub fn select_slot(&mut self, name: &str) -> Result<FormState, FormError> {
        if !self.catalog.has_slot(name) {
            return Err(invalid(Field::Slot, name));
        }
        let changed = set_text(&mut self.selection.slot, name);
        Ok(self.after_change(changed))
    }

    pub fn select_nationality(&mut self, name: &str) -> Result<FormState, FormError> {
        if !self.catalog.has_nationality(name) {
            return Err(invalid(Field::Nationality, name));
        }
        let changed = set_text(&mut self.selection.nationality, name);
        Ok(self.after_change(changed))
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Result<FormState, FormError> {
        let today = self.clock.today();
        if date < today {
            return Err(FormError::PastDateSelected { date, today });
        }
        let changed = self.selection.visit_date != Some(date);
        if changed {
            self.selection.visit_date = Some(date);
            self.selection.visit_date_display = Some(format_visit_date(&date));
        }
        Ok(self.after_change(changed))
    }

    pub fn clear(&mut self, field: Field) -> FormState {
        let changed = self.selection.is_set(field);
        match field {
            Field::Monument => self.selection.monument = None,
            Field::VisitDate => {
                self.selection.visit_date = None;
                self.selection.visit_date_display = None;
            }
            Field::Slot => self.selection.slot = None,
            Field::Nationality => self.selection.nationality = None,
        }
        self.after_change(changed)
    }

    pub fn reset(&mut self) -> FormState {
        let changed = self.selection != BookingSelection::default();
        self.selection = BookingSelection::default();
        self.after_change(changed)
    }

    /// Builds the request for the current selection. Does not touch the
    /// selection, so the form can be submitted again or edited afterwards.
    ///
    /// The date is checked again because a session may outlive the day it was
    /// selected on.
    pub fn submit(&self) -> Result<SubmissionRequest, FormError> {
        let s = &self.selection;
        match (&s.monument, &s.visit_date, &s.slot, &s.nationality) {
            (Some(monument), Some(date), Some(slot), Some(nationality)) => {
                let today = self.clock.today();
                if *date < today {
                    return Err(FormError::PastDateSelected { date: *date, today });
                }
                Ok(SubmissionRequest {
                    monument: monument.clone(),
                    visit_date: format_visit_date(date),
                    slot: slot.clone(),
                    nationality: nationality.clone(),
                })
            }
            _ => Err(FormError::IncompleteForm {
                missing: self.missing_fields(),
            }),
        }
    }

    fn after_change(&self, changed: bool) -> FormState {
        let state = self.state();
        if changed {
            for observer in &self.observers {
                observer.on_change(&self.selection, state);
            }
        }
        state
    }
}

fn invalid(field: Field, value: &str) -> FormError {
    FormError::InvalidSelection {
        field,
        value: value.to_string(),
    }
}

fn set_text(slot: &mut Option<String>, value: &str) -> bool {
    if slot.as_deref() == Some(value) {
        return false;
    }
    *slot = Some(value.to_string());
    true
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::services::clock::FixedClock;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn controller() -> BookingFormController {
        BookingFormController::new(Arc::new(Catalog::default()), Arc::new(FixedClock(today())))
    }

    fn filled() -> BookingFormController {
        let mut form = controller();
        form.select_monument("Taj Mahal").unwrap();
        form.select_date(today()).unwrap();
        form.select_slot("Evening").unwrap();
        form.select_nationality("Indian").unwrap();
        form
    }

    struct Recorder(Arc<Mutex<Vec<FormState>>>);

    impl FormObserver for Recorder {
        fn on_change(&self, _selection: &BookingSelection, state: FormState) {
            self.0.lock().unwrap().push(state);
        }
    }

    #[test]
    fn test_starts_incomplete() {
        let form = controller();
        assert_eq!(form.state(), FormState::Incomplete);
        assert_eq!(form.selection(), &BookingSelection::default());
    }

    #[test]
    fn test_unknown_monument_leaves_selection() {
        let mut form = controller();
        form.select_monument("Red Fort").unwrap();

        for name in ["Eiffel Tower", "", "red fort", "Red Fort "] {
            let err = form.select_monument(name).unwrap_err();
            assert!(matches!(err, FormError::InvalidSelection { field: Field::Monument, .. }));
            assert_eq!(form.selection().monument.as_deref(), Some("Red Fort"));
        }
    }

    #[test]
    fn test_unknown_slot_and_nationality_rejected() {
        let mut form = controller();
        assert!(form.select_slot("Midnight").is_err());
        assert!(form.select_nationality("Martian").is_err());
        assert_eq!(form.selection(), &BookingSelection::default());
    }

    #[test]
    fn test_past_date_rejected() {
        let mut form = controller();
        let future = NaiveDate::from_ymd_opt(2026, 12, 1).unwrap();
        form.select_date(future).unwrap();

        for days_ago in [1, 2, 365] {
            let past = today() - chrono::Duration::days(days_ago);
            let err = form.select_date(past).unwrap_err();
            assert!(matches!(err, FormError::PastDateSelected { .. }));
            assert_eq!(err.to_string(), "Please select today or a future date");
            assert_eq!(form.selection().visit_date, Some(future));
            assert_eq!(form.selection().visit_date_display.as_deref(), Some("01/12/2026"));
        }
    }

    #[test]
    fn test_today_and_future_accepted() {
        let mut form = controller();
        form.select_date(today()).unwrap();
        assert_eq!(form.selection().visit_date_display.as_deref(), Some("17/10/2026"));

        let later = NaiveDate::from_ymd_opt(2027, 2, 3).unwrap();
        form.select_date(later).unwrap();
        assert_eq!(form.selection().visit_date, Some(later));
        assert_eq!(form.selection().visit_date_display.as_deref(), Some("03/02/2027"));
    }

    #[test]
    fn test_full_selection_submits() {
        let form = filled();
        assert_eq!(form.state(), FormState::Ready);

        let request = form.submit().unwrap();
        assert_eq!(
            request,
            SubmissionRequest {
                monument: "Taj Mahal".to_string(),
                visit_date: "17/10/2026".to_string(),
                slot: "Evening".to_string(),
                nationality: "Indian".to_string(),
            }
        );
    }

    #[test]
    fn test_submit_names_missing_fields() {
        let mut form = controller();
        form.select_monument("Taj Mahal").unwrap();
        form.select_slot("Afternoon").unwrap();

        let err = form.submit().unwrap_err();
        assert_eq!(
            err,
            FormError::IncompleteForm {
                missing: vec![Field::VisitDate, Field::Nationality]
            }
        );
    }

    #[test]
    fn test_clearing_field_returns_to_incomplete() {
        let mut form = filled();
        assert_eq!(form.clear(Field::Slot), FormState::Incomplete);
        assert!(form.submit().is_err());

        assert_eq!(form.select_slot("Forenoon").unwrap(), FormState::Ready);
        assert_eq!(form.clear(Field::VisitDate), FormState::Incomplete);
        assert!(form.selection().visit_date_display.is_none());
    }

    #[test]
    fn test_reusable_after_submit() {
        let mut form = filled();
        form.submit().unwrap();
        assert_eq!(form.state(), FormState::Ready);

        form.select_monument("Hawa Mahal").unwrap();
        assert_eq!(form.submit().unwrap().monument, "Hawa Mahal");
    }

    #[test]
    fn test_reset() {
        let mut form = filled();
        assert_eq!(form.reset(), FormState::Incomplete);
        assert_eq!(form.missing_fields(), Field::ALL.to_vec());
    }

    #[test]
    fn test_select_slot_idempotent() {
        let mut once = controller();
        once.select_slot("Afternoon").unwrap();

        let mut twice = controller();
        twice.select_slot("Afternoon").unwrap();
        twice.select_slot("Afternoon").unwrap();

        assert_eq!(once.selection(), twice.selection());
        assert_eq!(once.state(), twice.state());
    }

    #[test]
    fn test_observer_sees_accepted_changes_only() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut form = controller();
        form.subscribe(Box::new(Recorder(Arc::clone(&seen))));

        form.select_monument("Taj Mahal").unwrap();
        form.select_monument("Taj Mahal").unwrap();
        let _ = form.select_monument("Atlantis");
        let _ = form.select_date(today() - chrono::Duration::days(1));
        form.select_date(today()).unwrap();
        form.select_slot("Evening").unwrap();
        form.select_nationality("SAARC").unwrap();
        form.clear(Field::Monument);
        form.clear(Field::Monument);

        let states = seen.lock().unwrap().clone();
        assert_eq!(
            states,
            vec![
                FormState::Incomplete,
                FormState::Incomplete,
                FormState::Incomplete,
                FormState::Ready,
                FormState::Incomplete,
            ]
        );
    }

    #[test]
    fn test_submit_rechecks_date() {
        let catalog = Arc::new(Catalog::default());
        let mut form = BookingFormController::new(Arc::clone(&catalog), Arc::new(FixedClock(today())));
        form.select_monument("Qutub Minar").unwrap();
        form.select_date(today()).unwrap();
        form.select_slot("Forenoon").unwrap();
        form.select_nationality("Foreigner").unwrap();

        form.clock = Arc::new(FixedClock(today() + chrono::Duration::days(1)));
        let err = form.submit().unwrap_err();
        assert!(matches!(err, FormError::PastDateSelected { .. }));
    }

    #[test]
    fn test_stale_date_is_not_ready() {
        let mut form = filled();
        assert_eq!(form.state(), FormState::Ready);

        form.clock = Arc::new(FixedClock(today() + chrono::Duration::days(1)));
        assert_eq!(form.state(), FormState::Incomplete);
        assert_eq!(form.missing_fields(), vec![Field::VisitDate]);
        assert!(form.submit().is_err());

        form.clear(Field::Slot);
        assert_eq!(form.missing_fields(), vec![Field::VisitDate, Field::Slot]);

        form.select_slot("Evening").unwrap();
        let tomorrow = today() + chrono::Duration::days(1);
        assert_eq!(form.select_date(tomorrow).unwrap(), FormState::Ready);
        assert_eq!(form.submit().unwrap().visit_date, "18/10/2026");
    }
}
