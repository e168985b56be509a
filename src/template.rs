// Content assembler for the Life Design Dashboard.
//
// Pure data construction: no network, no I/O. The order of `push` calls is
// the reading order of the page in Notion.

use crate::blocks::{bulleted_list, divider, heading, paragraph, todo, toggle, ContentItem};

/// Title used when the caller does not supply one.
pub const DEFAULT_TITLE: &str = "Sarah's Life Design Dashboard";

/// A titled, ordered sequence of content items, consumed once by the uploader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub items: Vec<ContentItem>,
}

/// Wrap the dashboard body under `title`.
pub fn build_document(title: impl Into<String>) -> Document {
    Document {
        title: title.into(),
        items: build_document_body(),
    }
}

/// Build the full dashboard body, section by section.
pub fn build_document_body() -> Vec<ContentItem> {
    let mut body = Vec::new();
    welcome(&mut body);
    habit_tracker(&mut body);
    goal_tracker(&mut body);
    weekly_review(&mut body);
    bookshelf(&mut body);
    student_tracker(&mut body);
    body
}

fn blank() -> ContentItem {
    paragraph("")
}

fn welcome(body: &mut Vec<ContentItem>) {
    body.push(paragraph("Welcome to your Life Design Dashboard! ✨"));
    body.push(paragraph(
        "This template helps you track habits, set goals, plan your week, and organize your reading.",
    ));
    body.push(divider());
}

fn habit_tracker(body: &mut Vec<ContentItem>) {
    body.push(heading(1, "The Ultimate Habit Tracker"));
    body.push(paragraph(
        "Track your daily habits and build consistency. Check off each habit as you complete it.",
    ));
    body.push(blank());

    body.push(heading(2, "Daily Habits"));
    for habit in [
        "Morning routine",
        "Exercise / Physical activity",
        "Read for 30 minutes",
        "Meditation / Mindfulness",
        "Healthy meals",
        "Evening routine",
        "Journal entry",
        "Gratitude practice",
    ] {
        body.push(todo(habit));
    }

    body.push(blank());
    body.push(paragraph("Weekly Habits"));
    for habit in [
        "Deep work session",
        "Social connection",
        "Learning / Skill development",
        "Rest day / Self-care",
        "Review and plan",
    ] {
        body.push(todo(habit));
    }

    body.push(blank());
    body.push(paragraph(
        "💡 Tip: Focus on consistency over perfection. Track what matters most to you.",
    ));
    body.push(divider());
}

fn goal_tracker(body: &mut Vec<ContentItem>) {
    body.push(heading(1, "The Ultimate Goal Tracker"));
    body.push(paragraph(
        "Set meaningful goals and track your progress. Break down big goals into actionable steps.",
    ));
    body.push(blank());

    body.push(heading(2, "Long-term Goals (3-12 months)"));
    body.push(paragraph("Goal: [Describe your long-term goal]"));
    body.push(paragraph("Deadline: [Set your target date]"));
    body.push(paragraph("Milestones:"));
    body.extend(bulleted_list(&[
        "[First milestone]",
        "[Second milestone]",
        "[Third milestone]",
    ]));

    body.push(blank());
    body.push(heading(2, "Short-term Goals (1-3 months)"));
    body.push(paragraph("Goal: [Describe your short-term goal]"));
    body.push(paragraph("Actions:"));
    body.extend(bulleted_list(&[
        "[Action item 1]",
        "[Action item 2]",
        "[Action item 3]",
    ]));

    body.push(blank());
    body.push(heading(2, "This Month's Focus"));
    body.push(todo("Priority 1: [Your main focus for this month]"));
    body.push(todo("Priority 2: [Secondary focus]"));
    body.push(todo("Priority 3: [Third focus]"));

    body.push(blank());
    body.push(paragraph("Progress Notes:"));
    body.push(paragraph("Track your wins, challenges, and learnings here..."));
    body.push(divider());
}

fn weekly_review(body: &mut Vec<ContentItem>) {
    body.push(heading(1, "My Weekly Review"));
    body.push(paragraph("Use this section to reflect on your week and plan ahead."));
    body.push(blank());

    body.push(heading(2, "Week of [Date Range]"));
    body.push(blank());

    body.push(heading(3, "Reflection"));
    for question in [
        "What were my biggest wins this week?",
        "What challenges did I face?",
        "What did I learn?",
        "What am I grateful for?",
        "How did I feel overall?",
    ] {
        body.push(paragraph(question));
        body.push(blank());
    }

    body.push(heading(3, "Planning"));
    body.push(paragraph("Top 3 priorities for next week:"));
    body.push(todo("Priority 1: [Your main focus]"));
    body.push(todo("Priority 2: [Secondary focus]"));
    body.push(todo("Priority 3: [Third focus]"));

    body.push(blank());
    body.push(paragraph("Key events & deadlines:"));
    body.extend(bulleted_list(&["[Add important dates and events]"]));

    body.push(blank());
    body.push(paragraph("Notes for next week:"));
    body.push(paragraph("..."));
    body.push(divider());
}

fn bookshelf(body: &mut Vec<ContentItem>) {
    body.push(heading(1, "Bookshelf Tracker"));
    body.push(paragraph(
        "Keep track of all your books in one place - what you're reading, want to read, and have completed.",
    ));
    body.push(blank());

    body.push(heading(2, "Currently Reading"));
    body.push(toggle(
        "📖 [Book Title] by [Author]",
        vec![
            paragraph("Progress: [Current page/chapter]"),
            paragraph("Started: [Date]"),
            paragraph("Notes: [Your thoughts and insights]"),
        ],
    ));

    body.push(blank());
    body.push(heading(2, "Want to Read"));
    body.extend(bulleted_list(&[
        "📚 [Book Title] by [Author] - [Why you want to read it]";
        3
    ]));

    body.push(blank());
    body.push(heading(2, "Completed"));
    for line in [
        "✅ [Book Title] by [Author] - Finished: [Date]",
        "Rating: ⭐⭐⭐⭐⭐",
        "Key Takeaways: [Your main learnings]",
    ] {
        body.push(paragraph(line));
    }

    body.push(blank());
    body.push(paragraph(
        "💡 Tip: Use this tracker to build your reading habit and remember key insights from books you've read.",
    ));
    body.push(divider());
}

fn student_tracker(body: &mut Vec<ContentItem>) {
    body.push(heading(1, "Student Tracker"));
    body.push(paragraph(
        "Organize your academic life - track courses, assignments, deadlines, and study sessions.",
    ));
    body.push(blank());

    body.push(heading(2, "Current Courses"));
    body.push(toggle(
        "📚 [Course Name]",
        vec![
            paragraph("Instructor: [Professor Name]"),
            paragraph("Schedule: [Days/Times]"),
            paragraph("Credits: [Number]"),
            blank(),
            paragraph("Assignments:"),
            todo("[Assignment 1] - Due: [Date]"),
            todo("[Assignment 2] - Due: [Date]"),
            blank(),
            paragraph("Notes: [Your notes about the course]"),
        ],
    ));

    body.push(blank());
    body.push(heading(2, "Upcoming Deadlines"));
    body.extend(bulleted_list(&[
        "[Assignment/Exam Name] - Due: [Date] - [Course]";
        3
    ]));

    body.push(blank());
    body.push(heading(2, "Study Sessions"));
    body.push(paragraph("Track your study time and topics:"));
    for line in [
        "Date: [Date]",
        "Duration: [Hours]",
        "Subject/Topic: [What you studied]",
        "Notes: [Key learnings or concepts]",
    ] {
        body.push(paragraph(line));
    }
    body.push(blank());

    body.push(heading(2, "Grades & Progress"));
    body.push(paragraph("Course: [Course Name]"));
    body.push(paragraph("Current Grade: [Grade/Percentage]"));
    body.push(paragraph("Target Grade: [Your goal]"));
    body.push(blank());
    body.push(paragraph(
        "💡 Tip: Update this regularly to stay on top of your academic goals and track your progress.",
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h1_titles(items: &[ContentItem]) -> Vec<&str> {
        items
            .iter()
            .filter(|i| i.kind() == "heading_1")
            .filter_map(ContentItem::text)
            .collect()
    }

    #[test]
    fn sections_appear_in_reading_order() {
        let body = build_document_body();
        assert_eq!(
            h1_titles(&body),
            vec![
                "The Ultimate Habit Tracker",
                "The Ultimate Goal Tracker",
                "My Weekly Review",
                "Bookshelf Tracker",
                "Student Tracker",
            ]
        );
        assert_eq!(body[0].text(), Some("Welcome to your Life Design Dashboard! ✨"));
    }

    #[test]
    fn sections_are_separated_by_dividers() {
        let body = build_document_body();
        let dividers = body.iter().filter(|i| **i == ContentItem::Divider).count();
        // One after the welcome block and one after every section but the last.
        assert_eq!(dividers, 5);
        assert_ne!(body.last(), Some(&ContentItem::Divider));
    }

    #[test]
    fn daily_habits_are_unchecked_todos() {
        let body = build_document_body();
        let start = body
            .iter()
            .position(|i| i.text() == Some("Daily Habits"))
            .unwrap();
        let habits: Vec<_> = body[start + 1..]
            .iter()
            .take_while(|i| i.kind() == "to_do")
            .collect();
        assert_eq!(habits.len(), 8);
        assert!(habits
            .iter()
            .all(|h| matches!(h, ContentItem::ToDo { checked: false, .. })));
    }

    #[test]
    fn course_toggle_carries_nested_items() {
        let body = build_document_body();
        let course = body
            .iter()
            .find(|i| i.text() == Some("📚 [Course Name]"))
            .unwrap();
        assert_eq!(course.children().len(), 9);
        assert_eq!(course.children()[5].kind(), "to_do");
    }

    #[test]
    fn document_is_built_under_given_title() {
        let doc = build_document(DEFAULT_TITLE);
        assert_eq!(doc.title, "Sarah's Life Design Dashboard");
        assert_eq!(doc.items, build_document_body());
        assert!(!doc.items.is_empty());
    }
}
