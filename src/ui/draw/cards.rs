//! Student card layout
//!
//! A card is built from a `Student` first and turned into lines afterwards,
//! so the students list and the search results share one layout.

use super::styling;
use crate::types::Student;
use crate::utils::{format_number, format_optional};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

pub const NO_GRADES: &str = "No grades added yet";

#[derive(Debug, Clone, PartialEq)]
pub struct StudentCard {
    pub name: String,
    pub student_id: String,
    /// (subject, grade) in server order
    pub grade_rows: Vec<(String, String)>,
    /// Present only when the student has at least one subject
    pub average: Option<String>,
}

impl From<&Student> for StudentCard {
    fn from(student: &Student) -> Self {
        let grade_rows = student
            .grade_rows()
            .map(|(subject, grade)| {
                let grade = grade.map(format_number).unwrap_or_else(|| "-".to_string());
                (subject.to_string(), grade)
            })
            .collect();

        Self {
            name: student.name.clone(),
            student_id: student.student_id.clone(),
            grade_rows,
            average: student
                .has_grades()
                .then(|| format!("Average: {}", format_optional(student.average))),
        }
    }
}

impl StudentCard {
    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                self.name.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("ID: {}", self.student_id),
                Style::default().fg(styling::muted()),
            )),
        ];

        if self.grade_rows.is_empty() {
            lines.push(Line::from(Span::styled(
                NO_GRADES,
                Style::default()
                    .fg(styling::muted())
                    .add_modifier(Modifier::ITALIC),
            )));
        } else {
            let width = self
                .grade_rows
                .iter()
                .map(|(subject, _)| subject.chars().count())
                .max()
                .unwrap_or(0);
            for (subject, grade) in &self.grade_rows {
                lines.push(Line::from(vec![
                    Span::raw(format!("  {subject:<width$}  ")),
                    Span::styled(grade.clone(), Style::default().fg(Color::Cyan)),
                ]));
            }
        }

        if let Some(average) = &self.average {
            lines.push(Line::from(Span::styled(
                average.clone(),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> Student {
        Student {
            student_id: "s1".to_string(),
            name: "Ada".to_string(),
            subjects: vec!["Math".to_string(), "Sci".to_string()],
            grades: vec![80.0, 90.0],
            average: Some(85.0),
        }
    }

    #[test]
    fn test_card_grade_rows_in_order_with_average() {
        let card = StudentCard::from(&ada());
        assert_eq!(
            card.grade_rows,
            vec![
                ("Math".to_string(), "80".to_string()),
                ("Sci".to_string(), "90".to_string())
            ]
        );
        assert_eq!(card.average.as_deref(), Some("Average: 85"));
    }

    #[test]
    fn test_card_without_grades_has_placeholder_and_no_badge() {
        let mut student = ada();
        student.subjects.clear();
        student.grades.clear();
        let card = StudentCard::from(&student);

        assert!(card.average.is_none());
        let text: Vec<String> = card.lines().iter().map(|l| l.to_string()).collect();
        assert_eq!(text, vec!["Ada", "ID: s1", NO_GRADES]);
    }

    #[test]
    fn test_card_lines() {
        let text: Vec<String> = StudentCard::from(&ada())
            .lines()
            .iter()
            .map(|l| l.to_string())
            .collect();
        assert_eq!(
            text,
            vec!["Ada", "ID: s1", "  Math  80", "  Sci   90", "Average: 85"]
        );
    }

    #[test]
    fn test_card_missing_grade_shows_dash() {
        let mut student = ada();
        student.grades.pop();
        let card = StudentCard::from(&student);
        assert_eq!(card.grade_rows[1].1, "-");
    }

    #[test]
    fn test_card_null_average_shows_na() {
        let mut student = ada();
        student.average = None;
        let card = StudentCard::from(&student);
        assert_eq!(card.average.as_deref(), Some("Average: N/A"));
    }
}
