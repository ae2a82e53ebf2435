//! Ticket 內文解析。
//!
//! Ticket 由 issue 模板產生，每個欄位的格式固定為：
//!
//! ```text
//! ### Bootcamp Date
//!
//! 2024-01-01
//! ### Attendees
//!
//! alice, bob
//! ### Facilitators
//!
//! carol
//! ```
//!
//! 標題行必須完全相符，值固定位於標題之後第二行（中間隔一個空行）。
//! 模板若有變動，只需要調整 [`TICKET_SECTIONS`] 與 [`VALUE_OFFSET`]。

use crate::domain::model::Request;
use crate::utils::error::{BootcampError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketField {
    BootcampDate,
    Attendees,
    Facilitators,
}

impl TicketField {
    pub fn name(&self) -> &'static str {
        match self {
            TicketField::BootcampDate => "Bootcamp Date",
            TicketField::Attendees => "Attendees",
            TicketField::Facilitators => "Facilitators",
        }
    }
}

/// 模板中的區段標題與對應欄位
pub const TICKET_SECTIONS: [(&str, TicketField); 3] = [
    ("### Bootcamp Date", TicketField::BootcampDate),
    ("### Attendees", TicketField::Attendees),
    ("### Facilitators", TicketField::Facilitators),
];

/// 值所在行相對於標題行的位移
pub const VALUE_OFFSET: usize = 2;

/// 解析 ticket 內文為 [`Request`]；任一欄位缺少或為空時回傳 `MissingFieldError`
pub fn extract_request(body: &str) -> Result<Request> {
    let lines: Vec<&str> = body.lines().collect();

    let mut date = None;
    let mut attendees = None;
    let mut facilitators = None;

    for (index, line) in lines.iter().enumerate() {
        let Some((_, field)) = TICKET_SECTIONS.iter().find(|(header, _)| line == header) else {
            continue;
        };
        let Some(value) = lines.get(index + VALUE_OFFSET) else {
            continue;
        };

        // 同一標題出現多次時，以最後一次為準
        match field {
            TicketField::BootcampDate => date = Some(value.trim().to_string()),
            TicketField::Attendees => attendees = Some(split_handles(value)),
            TicketField::Facilitators => facilitators = Some(split_handles(value)),
        }
    }

    let date = date
        .filter(|d| !d.is_empty())
        .ok_or_else(|| missing(TicketField::BootcampDate))?;
    let attendees = attendees
        .filter(|a| !a.is_empty())
        .ok_or_else(|| missing(TicketField::Attendees))?;
    let facilitators = facilitators
        .filter(|f| !f.is_empty())
        .ok_or_else(|| missing(TicketField::Facilitators))?;

    tracing::info!("📅 Bootcamp date: {}", date);
    tracing::info!("🎓 Attendees: {:?}", attendees);
    tracing::info!("🧑‍🏫 Facilitators: {:?}", facilitators);

    Ok(Request {
        date,
        attendees,
        facilitators,
    })
}

fn split_handles(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|handle| !handle.is_empty())
        .map(str::to_string)
        .collect()
}

fn missing(field: TicketField) -> BootcampError {
    BootcampError::MissingFieldError {
        field: field.name().to_string(),
    }
}
