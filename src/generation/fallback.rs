//! Offline lesson-plan text used when the generation service is unavailable.

use super::prompt::SECTIONS;

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default
    } else {
        trimmed
    }
}

/// Deterministic plan with the same nine sections the service is asked for.
pub fn generate_demo(
    grade: &str,
    subject: &str,
    exam_text: &str,
    topics: &str,
    objectives: &str,
    materials: &str,
) -> String {
    let exams = or_default(exam_text, "general curriculum standards");
    let topics = or_default(topics, "the core topics of the unit");
    let objectives = or_default(objectives, "understand and apply the key ideas of the lesson");
    let materials = or_default(materials, "whiteboard, markers and the class textbook");

    let bodies: [String; 9] = [
        format!(
            "By the end of this {subject} lesson, {grade} learners should be able to:\n\
             - {objectives}\n\
             - Explain the main ideas of {topics} in their own words\n\
             - Answer questions on {topics} in the style of {exams}"
        ),
        format!(
            "Short-term: learners can describe and discuss {topics} confidently during the lesson.\n\
             Long-term: learners build on {topics} in later {subject} units and in {exams} preparation."
        ),
        format!(
            "- Review the syllabus requirements for {topics} under {exams}\n\
             - Prepare one short video clip, one labelled diagram and a mind map of {topics}\n\
             - Check that the following are ready: {materials}"
        ),
        format!("- {materials}\n- Exercise books and pens\n- Printed take-home worksheets"),
        format!(
            "Open with a question that links {topics} to everyday life. Give learners two \
             minutes to discuss in pairs, then collect a few answers on the board."
        ),
        format!(
            "Introduce {topics} step by step, using {materials} to demonstrate each idea. \
             After each step, check understanding with a quick question before moving on. \
             Work through one {exams}-style example together."
        ),
        format!(
            "Recap the key points of {topics}. Learners attempt two short {exams}-style \
             questions individually, then compare answers with a partner."
        ),
        format!(
            "- High ability: write a short explanation of {topics} with a worked {exams}-style question\n\
             - Medium ability: answer five structured questions on {topics}\n\
             - Low ability: label a diagram and complete a fill-in-the-gaps summary of {topics}"
        ),
        format!(
            "- What learners knew before: their prior ideas about {topics}\n\
             - What learners know now: {objectives}\n\
             - What learners should know next: how {topics} connects to the next {subject} lesson"
        ),
    ];

    let mut out = format!("Lesson Plan: {subject} ({grade})\nExams: {exams}\n");
    for (i, (section, body)) in SECTIONS.iter().zip(bodies.iter()).enumerate() {
        out.push_str(&format!("\n## {}. {}\n{}\n", i + 1, section.title, body));
    }
    out
}
