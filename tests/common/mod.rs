// tests/common/mod.rs
#![allow(dead_code)]

use std::{cell::RefCell, collections::VecDeque};

use contrib_chart::core::net::{Origin, OriginResponse, Validators};
use contrib_chart::ChartError;

/// Scripted origin: replays queued responses and records what it was asked.
#[derive(Default)]
pub struct FakeOrigin {
    replies: RefCell<VecDeque<OriginResponse>>,
    pub seen: RefCell<Vec<(String, Validators)>>,
}

impl FakeOrigin {
    pub fn new(replies: Vec<OriginResponse>) -> Self {
        Self { replies: RefCell::new(replies.into()), seen: RefCell::default() }
    }

    pub fn calls(&self) -> usize {
        self.seen.borrow().len()
    }

    pub fn last_validators(&self) -> Validators {
        self.seen.borrow().last().map(|(_, v)| v.clone()).unwrap_or_default()
    }
}

impl Origin for FakeOrigin {
    fn get(&self, url: &str, validators: &Validators) -> Result<OriginResponse, ChartError> {
        self.seen.borrow_mut().push((url.to_string(), validators.clone()));
        Ok(self
            .replies
            .borrow_mut()
            .pop_front()
            .expect("FakeOrigin ran out of scripted replies"))
    }
}

pub fn validators(etag: Option<&str>, last_modified: Option<&str>) -> Validators {
    Validators {
        etag: etag.map(String::from),
        last_modified: last_modified.map(String::from),
    }
}

pub fn ok(body: &str, etag: Option<&str>, last_modified: Option<&str>) -> OriginResponse {
    OriginResponse { status: 200, validators: validators(etag, last_modified), body: Some(body.to_string()) }
}

pub fn not_modified(etag: Option<&str>, last_modified: Option<&str>) -> OriginResponse {
    OriginResponse { status: 304, validators: validators(etag, last_modified), body: None }
}

pub fn status(code: u16) -> OriginResponse {
    OriginResponse { status: code, validators: Validators::default(), body: None }
}

/// A small page in the current table + tooltip layout.
pub const TABLE_PAGE: &str = r#"
<div class="js-yearly-contributions">
  <h2 id="js-contribution-activity-description" class="f4 text-normal mb-2">
    1,024
      contributions
      in the last year
  </h2>
  <table class="ContributionCalendar-grid"><tbody>
    <tr>
      <td data-date="2024-01-01" id="contribution-day-component-1-0" data-level="3" class="ContributionCalendar-day"></td>
      <tool-tip for="contribution-day-component-1-0" popover="manual">5 contributions on January 1st.</tool-tip>
      <td data-date="2024-01-02" id="contribution-day-component-2-0" data-level="0" class="ContributionCalendar-day"></td>
      <tool-tip for="contribution-day-component-2-0" popover="manual">No contributions on January 2nd.</tool-tip>
    </tr>
  </tbody></table>
</div>
"#;
