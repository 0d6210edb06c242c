use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::prelude::*;

// Same as JavaScript's `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// The link students open to register their attendance,
/// usually presented as a QR code.
pub fn attendance_link(
    base_url: &str,
    course_id: &str,
    schedule: &ClassSchedule,
) -> Result<String> {
    let course_id = course_id.trim();
    if course_id.is_empty() {
        return Err(Error::CourseId);
    }
    let (lat, lng) = schedule.venue.pos.to_lat_lng_deg();
    let params = [
        ("courseId", course_id.to_string()),
        ("time", schedule.time_of_day()),
        ("courseCode", schedule.course_code.clone()),
        ("lat", lat.to_string()),
        ("lng", lng.to_string()),
    ]
    .into_iter()
    .map(|(key, value)| format!("{key}={}", utf8_percent_encode(&value, URI_COMPONENT)))
    .collect::<Vec<_>>()
    .join("&");
    let base_url = base_url.trim_end_matches('/');
    Ok(format!("{base_url}/attendance?{params}"))
}

#[cfg(test)]
mod tests {
    use time::macros::time;
    use trackas_entities::builders::*;

    use super::*;

    #[test]
    fn encode_query_values() {
        let schedule = ClassSchedule::build()
            .course_code("CSC 301")
            .venue("Example Hall", Coordinate::from_lat_lng_deg(7.3056, 5.1357))
            .time(time!(9:30))
            .finish();
        let link = attendance_link("https://trackas.example/", "42", &schedule).unwrap();
        assert_eq!(
            "https://trackas.example/attendance?courseId=42&time=09%3A30&courseCode=CSC%20301&lat=7.3056&lng=5.1357",
            link
        );
    }

    #[test]
    fn course_id_is_required() {
        let schedule = ClassSchedule::build().finish();
        assert_eq!(
            Err(Error::CourseId),
            attendance_link("http://localhost:5173", " ", &schedule)
        );
    }
}
