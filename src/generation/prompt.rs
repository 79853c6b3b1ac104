//! Prompt templates for lesson-plan generation.
//!
//! Fields are interpolated verbatim; nothing here escapes user input, so the
//! result must only ever be sent as plain text.

/// A required section of every lesson plan, in presentation order.
pub struct Section {
    pub title: &'static str,
    pub brief: &'static str,
}

pub const SECTIONS: [Section; 9] = [
    Section {
        title: "Lesson Objectives",
        brief: "the learning objectives, rephrased and organised where needed",
    },
    Section {
        title: "Prescribed Learning Outcomes",
        brief: "short-term and long-term outcomes",
    },
    Section {
        title: "Before the Lesson",
        brief: "what to prepare, including links to useful videos, images or mind maps",
    },
    Section {
        title: "Materials Needed",
        brief: "everything required in the classroom",
    },
    Section {
        title: "Engage",
        brief: "an engaging introduction",
    },
    Section {
        title: "Explore",
        brief: "the main lesson content",
    },
    Section {
        title: "Closure",
        brief: "a recap of key points or an in-class activity modelled on the exams",
    },
    Section {
        title: "Take-Home Assignment",
        brief: "three versions, for high, medium and low ability learners",
    },
    Section {
        title: "Reflection",
        brief: "three bullets: what learners knew before, what they know now, and what they should know next",
    },
];

pub fn exam_text(exams: &[String]) -> String {
    exams.join(", ")
}

fn section_list() -> String {
    SECTIONS
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {} ({})", i + 1, s.title, s.brief))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build(
    grade: &str,
    subject: &str,
    exams: &[String],
    topics: &str,
    objectives: &str,
    materials: &str,
) -> String {
    format!(
        "Create a detailed and structured lesson plan for a {grade} class on the subject: {subject}.\n\
         Align the content with the exams: {exams}. Write it the way an experienced teacher would, \
         not like a generated document, and make it thorough.\n\
         \n\
         Topics to be covered:\n\
         {topics}\n\
         \n\
         Learning objectives:\n\
         {objectives}\n\
         \n\
         Instructional materials to be used:\n\
         {materials}\n\
         \n\
         Use exactly these section headings, in this order:\n\
         {sections}\n",
        exams = exam_text(exams),
        sections = section_list(),
    )
}

/// Ask for a rewrite of an existing plan that applies the teacher's feedback.
pub fn build_revision(current: &str, feedback: &str) -> String {
    format!(
        "Revise the lesson plan below according to the teacher's feedback. Keep every \
         section heading and their order, change only what the feedback asks for, and \
         return the complete revised plan.\n\
         \n\
         Teacher feedback:\n\
         {feedback}\n\
         \n\
         Current lesson plan:\n\
         {current}\n\
         \n\
         Required section headings:\n\
         {sections}\n",
        sections = section_list(),
    )
}
