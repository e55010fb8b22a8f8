//! Client-side checks run before any request is sent

/// Rejected input; the message is shown to the user as-is
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,

    #[error("Please fill in all fields correctly")]
    InvalidFields,

    #[error("Grade must be between 0 and 100")]
    GradeOutOfRange,

    #[error("Please enter a student ID")]
    MissingStudentId,

    #[error("Please enter a student name")]
    MissingStudentName,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    pub student_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradeEntry {
    pub student_id: String,
    pub subject: String,
    pub grade: f64,
}

pub const MIN_GRADE: f64 = 0.0;
pub const MAX_GRADE: f64 = 100.0;

pub fn new_student(student_id: &str, name: &str) -> Result<NewStudent, ValidationError> {
    let student_id = student_id.trim();
    let name = name.trim();

    if student_id.is_empty() || name.is_empty() {
        return Err(ValidationError::MissingFields);
    }

    Ok(NewStudent {
        student_id: student_id.to_string(),
        name: name.to_string(),
    })
}

pub fn grade_entry(
    student_id: &str,
    subject: &str,
    grade: &str,
) -> Result<GradeEntry, ValidationError> {
    let student_id = student_id.trim();
    let subject = subject.trim();
    let grade = parse_grade(grade);

    let (false, false, Some(grade)) = (student_id.is_empty(), subject.is_empty(), grade) else {
        return Err(ValidationError::InvalidFields);
    };

    if !(MIN_GRADE..=MAX_GRADE).contains(&grade) {
        return Err(ValidationError::GradeOutOfRange);
    }

    Ok(GradeEntry {
        student_id: student_id.to_string(),
        subject: subject.to_string(),
        grade,
    })
}

pub fn student_id(input: &str) -> Result<String, ValidationError> {
    match input.trim() {
        "" => Err(ValidationError::MissingStudentId),
        id => Ok(id.to_string()),
    }
}

pub fn student_name(input: &str) -> Result<String, ValidationError> {
    match input.trim() {
        "" => Err(ValidationError::MissingStudentName),
        name => Ok(name.to_string()),
    }
}

/// Parse a grade the way a number input would: finite decimal only
fn parse_grade(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|grade| grade.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_student_trims_fields() {
        let student = new_student("  s1 ", " Ada ").unwrap();
        assert_eq!(student.student_id, "s1");
        assert_eq!(student.name, "Ada");
    }

    #[test]
    fn test_new_student_requires_both_fields() {
        assert_eq!(new_student("", "Ada"), Err(ValidationError::MissingFields));
        assert_eq!(
            new_student("s1", "   "),
            Err(ValidationError::MissingFields)
        );
    }

    #[test]
    fn test_grade_bounds_are_inclusive() {
        assert_eq!(grade_entry("s1", "Math", "0").unwrap().grade, 0.0);
        assert_eq!(grade_entry("s1", "Math", "100").unwrap().grade, 100.0);
        assert_eq!(grade_entry("s1", "Math", " 72.5 ").unwrap().grade, 72.5);
    }

    #[test]
    fn test_grade_out_of_range() {
        assert_eq!(
            grade_entry("s1", "Math", "101"),
            Err(ValidationError::GradeOutOfRange)
        );
        assert_eq!(
            grade_entry("s1", "Math", "-5"),
            Err(ValidationError::GradeOutOfRange)
        );
    }

    #[test]
    fn test_grade_must_be_numeric() {
        assert_eq!(
            grade_entry("s1", "Math", "abc"),
            Err(ValidationError::InvalidFields)
        );
        assert_eq!(
            grade_entry("s1", "Math", "NaN"),
            Err(ValidationError::InvalidFields)
        );
        assert_eq!(
            grade_entry("s1", "Math", ""),
            Err(ValidationError::InvalidFields)
        );
    }

    #[test]
    fn test_grade_requires_id_and_subject() {
        assert_eq!(
            grade_entry("", "Math", "90"),
            Err(ValidationError::InvalidFields)
        );
        assert_eq!(
            grade_entry("s1", " ", "90"),
            Err(ValidationError::InvalidFields)
        );
    }

    #[test]
    fn test_search_inputs() {
        assert_eq!(student_id(" 7 "), Ok("7".to_string()));
        assert_eq!(student_id(""), Err(ValidationError::MissingStudentId));
        assert_eq!(student_name("  "), Err(ValidationError::MissingStudentName));
        assert_eq!(
            ValidationError::MissingStudentName.to_string(),
            "Please enter a student name"
        );
    }
}
