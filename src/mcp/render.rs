//! Plain-text layouts for tool results.

use crate::graph::{DateTimeTimeZone, Event, Message, Team, User};

/// Width of the dash line written after each item.
pub const SEPARATOR_WIDTH: usize = 50;

const MISSING: &str = "N/A";

fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

fn or_missing(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(MISSING)
}

fn date_time(value: Option<&DateTimeTimeZone>) -> &str {
    or_missing(value.and_then(|dt| dt.date_time.as_deref()))
}

/// Render at most `top` messages.
pub fn emails(messages: &[Message], top: u32) -> String {
    let mut out = String::from("Recent Emails:\n\n");
    let sep = separator();

    for msg in messages.iter().take(top as usize) {
        let from = or_missing(msg.from.as_ref().and_then(|r| r.address()));
        let received = msg
            .received_date_time
            .map(|dt| dt.to_string())
            .unwrap_or_else(|| MISSING.to_string());

        out.push_str(&format!("From: {}\n", from));
        out.push_str(&format!("Subject: {}\n", or_missing(msg.subject.as_deref())));
        out.push_str(&format!("Received: {}\n", received));
        out.push_str(&sep);
        out.push('\n');
    }

    out
}

/// `days` only appears in the heading; events are not filtered by it.
pub fn calendar_events(events: &[Event], days: u32) -> String {
    let mut out = format!("Calendar Events (next {} days):\n\n", days);
    let sep = separator();

    for event in events {
        out.push_str(&format!("Subject: {}\n", or_missing(event.subject.as_deref())));
        out.push_str(&format!("Start: {}\n", date_time(event.start.as_ref())));
        out.push_str(&format!("End: {}\n", date_time(event.end.as_ref())));
        out.push_str(&sep);
        out.push('\n');
    }

    out
}

pub fn teams(teams: &[Team]) -> String {
    let mut out = String::from("Microsoft Teams:\n\n");
    let sep = separator();

    for team in teams {
        out.push_str(&format!("Team: {}\n", or_missing(team.display_name.as_deref())));
        out.push_str(&format!(
            "Description: {}\n",
            or_missing(team.description.as_deref())
        ));
        out.push_str(&sep);
        out.push('\n');
    }

    out
}

pub fn user_profile(user: &User) -> String {
    let mut out = String::from("User Profile:\n\n");
    out.push_str(&format!("Name: {}\n", or_missing(user.display_name.as_deref())));
    out.push_str(&format!("Email: {}\n", or_missing(user.email())));
    out.push_str(&format!("Job Title: {}\n", or_missing(user.job_title.as_deref())));
    out.push_str(&format!(
        "Office Location: {}\n",
        or_missing(user.office_location.as_deref())
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{EmailAddress, Recipient};
    use chrono::{TimeZone, Utc};

    fn message(from: &str, subject: &str, hour: u32) -> Message {
        Message {
            subject: Some(subject.to_string()),
            from: Some(Recipient {
                email_address: Some(EmailAddress {
                    name: None,
                    address: Some(from.to_string()),
                }),
            }),
            received_date_time: Some(Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()),
            ..Default::default()
        }
    }

    fn separators(text: &str) -> usize {
        text.lines().filter(|l| *l == "-".repeat(50)).count()
    }

    #[test]
    fn test_emails_two_messages() {
        let text = emails(
            &[
                message("ada@contoso.com", "Hello", 9),
                message("grace@contoso.com", "Re: Hello", 10),
            ],
            2,
        );

        let expected = format!(
            "Recent Emails:\n\n\
             From: ada@contoso.com\nSubject: Hello\nReceived: 2024-05-01 09:00:00 UTC\n{sep}\n\
             From: grace@contoso.com\nSubject: Re: Hello\nReceived: 2024-05-01 10:00:00 UTC\n{sep}\n",
            sep = "-".repeat(50)
        );
        assert_eq!(text, expected);
        assert_eq!(separators(&text), 2);
    }

    #[test]
    fn test_emails_truncated_to_top() {
        let msgs: Vec<_> = (0..5)
            .map(|i| message("x@contoso.com", &format!("m{}", i), i))
            .collect();
        let text = emails(&msgs, 3);

        assert_eq!(separators(&text), 3);
        assert!(text.contains("Subject: m2\n"));
        assert!(!text.contains("Subject: m3\n"));
    }

    #[test]
    fn test_emails_preserve_order_and_duplicates() {
        let msgs = vec![
            message("b@contoso.com", "same", 9),
            message("a@contoso.com", "same", 9),
            message("b@contoso.com", "same", 9),
        ];
        let text = emails(&msgs, 10);

        let froms: Vec<_> = text.lines().filter(|l| l.starts_with("From: ")).collect();
        assert_eq!(
            froms,
            ["From: b@contoso.com", "From: a@contoso.com", "From: b@contoso.com"]
        );
    }

    #[test]
    fn test_emails_missing_fields() {
        let text = emails(&[Message::default()], 10);
        assert!(text.contains("From: N/A\nSubject: N/A\nReceived: N/A\n"));
    }

    #[test]
    fn test_emails_empty() {
        assert_eq!(emails(&[], 10), "Recent Emails:\n\n");
    }

    #[test]
    fn test_calendar_events_layout() {
        let events = vec![Event {
            subject: Some("Standup".to_string()),
            start: Some(DateTimeTimeZone {
                date_time: Some("2024-05-02T09:00:00.0000000".to_string()),
                time_zone: Some("UTC".to_string()),
            }),
            end: Some(DateTimeTimeZone {
                date_time: Some("2024-05-02T09:15:00.0000000".to_string()),
                time_zone: Some("UTC".to_string()),
            }),
            ..Default::default()
        }];

        let text = calendar_events(&events, 3);
        assert_eq!(
            text,
            format!(
                "Calendar Events (next 3 days):\n\n\
                 Subject: Standup\nStart: 2024-05-02T09:00:00.0000000\nEnd: 2024-05-02T09:15:00.0000000\n{}\n",
                "-".repeat(50)
            )
        );
    }

    #[test]
    fn test_calendar_event_missing_date_time() {
        let events = vec![Event {
            subject: Some("All hands".to_string()),
            start: Some(DateTimeTimeZone {
                date_time: None,
                time_zone: Some("UTC".to_string()),
            }),
            end: None,
            ..Default::default()
        }];

        let text = calendar_events(&events, 7);
        assert!(text.contains("Subject: All hands\nStart: N/A\nEnd: N/A\n"));
        assert_eq!(separators(&text), 1);
    }

    #[test]
    fn test_teams_description_fallback() {
        let text = teams(&[
            Team {
                display_name: Some("Ops".to_string()),
                description: Some("On-call rotation".to_string()),
                ..Default::default()
            },
            Team {
                display_name: Some("Design".to_string()),
                description: None,
                ..Default::default()
            },
        ]);

        assert!(text.starts_with("Microsoft Teams:\n\n"));
        assert!(text.contains("Team: Ops\nDescription: On-call rotation\n"));
        assert!(text.contains("Team: Design\nDescription: N/A\n"));
        assert_eq!(separators(&text), 2);
    }

    #[test]
    fn test_user_profile() {
        let user = User {
            display_name: Some("Ada Lovelace".to_string()),
            mail: None,
            user_principal_name: Some("ada@contoso.onmicrosoft.com".to_string()),
            job_title: Some("Engineer".to_string()),
            office_location: None,
            ..Default::default()
        };

        assert_eq!(
            user_profile(&user),
            "User Profile:\n\n\
             Name: Ada Lovelace\n\
             Email: ada@contoso.onmicrosoft.com\n\
             Job Title: Engineer\n\
             Office Location: N/A\n"
        );
    }
}
