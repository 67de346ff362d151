use crate::core::models::CarriedResult;
use log::debug;
use std::sync::Mutex;

/// One-shot handoff between a finished run and the view that follows it.
/// Nothing here outlives the process.
#[derive(Debug, Default)]
pub struct ResultSlot {
    inner: Mutex<Option<CarriedResult>>,
}

impl ResultSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, result: CarriedResult) {
        let mut slot = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if slot.is_some() {
            debug!("Replacing an untaken result");
        }
        *slot = Some(result);
    }

    pub fn take(&self) -> Option<CarriedResult> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
    }

    pub fn is_present(&self) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::AnalysisResult;
    use chrono::NaiveDate;

    fn carried() -> CarriedResult {
        CarriedResult {
            analysis: AnalysisResult {
                analysis_id: None,
                match_score: 50.0,
                resume_skills: vec![],
                job_skills: vec![],
                missing_skills: vec![],
                suggestions: vec![],
                analyzed_at: NaiveDate::from_ymd_opt(2024, 1, 2)
                    .unwrap()
                    .and_hms_opt(3, 4, 5)
                    .unwrap(),
            },
            resume_file_name: "cv.pdf".into(),
        }
    }

    #[test]
    fn payload_is_taken_exactly_once() {
        let slot = ResultSlot::new();
        assert!(slot.take().is_none());

        slot.put(carried());
        assert!(slot.is_present());
        assert_eq!(slot.take(), Some(carried()));
        assert!(slot.take().is_none());
        assert!(!slot.is_present());
    }

    #[test]
    fn poisoned_slot_still_reports_its_payload() {
        let slot = std::sync::Arc::new(ResultSlot::new());
        slot.put(carried());

        let poisoner = slot.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.lock().unwrap();
            panic!("poison the slot");
        })
        .join();

        assert!(slot.inner.is_poisoned());
        assert!(slot.is_present());
        assert_eq!(slot.take(), Some(carried()));
        assert!(!slot.is_present());
    }
}
