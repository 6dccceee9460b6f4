use crate::domain::alert::Alert;

const BANNER: &str = "**New ConnectWise Control Message** - There are no engineers connected.";
const NO_SESSION_CODE: &str = "N/A";
const NO_COMPANY: &str = "No company specified, possibly support session.";

// Render the chat message for an alert. Missing fields render blank.
pub fn format_alert(alert: &Alert) -> String {
    let session = &alert.session;
    let text = |value: &Option<String>| value.clone().unwrap_or_default();

    format!(
        "{BANNER}\n\
         Session Name: **{name}**\n\
         Session Code: **{code}**\n\
         Session Type: **{session_type}**\n\
         Remote Computer Username: **{guest_user}**\n\
         Remote Computer OS: **{guest_os}**\n\
         Company: {company}\n\
         \n\
         Message:\n\
         `{data}`",
        name = text(&session.name),
        code = session.code.as_deref().unwrap_or(NO_SESSION_CODE),
        session_type = text(&session.session_type),
        guest_user = text(&session.guest_user),
        guest_os = text(&session.guest_os),
        company = alert.company.name().unwrap_or(NO_COMPANY),
        data = text(&alert.event_data),
    )
}
