//! Prompt templates for routing and answering

use crate::core::subject::Subject;

/// Templates for each model call in the dispatch pipeline
pub struct TutorPrompt;

impl TutorPrompt {
    /// System prompt for the intent router
    pub fn router_system() -> &'static str {
        r#"You classify student questions by subject.
You must answer with a JSON object of the form {"route": "<subject>"} and nothing else."#
    }

    /// User prompt for the intent router
    pub fn router_query(question: &str) -> String {
        let subjects = Subject::schema_values()
            .iter()
            .map(|s| format!("\"{}\"", s))
            .collect::<Vec<_>>()
            .join(" or ");
        format!(
            r#"Determine whether the following query is related to Math or Physics.

Query: {}

Respond with either {}."#,
            question, subjects
        )
    }

    /// System prompt for the math handler
    pub fn math_system() -> &'static str {
        r#"You are a math tutor. Provide a step-by-step solution to the student's question.
If needed, use the calculator tool to perform calculations; never guess a numeric result you could compute.
If the calculator returns NaN or an error, fix the expression and try again.
When you are done, reply with a JSON object: {"solution": "<the step-by-step solution>"}."#
    }

    /// User prompt for the math handler
    pub fn math_query(question: &str) -> String {
        format!("Question: {}\n\nSolution:", question)
    }

    /// System prompt for the physics handler
    pub fn physics_system(constant_keys: &[&str]) -> String {
        format!(
            r#"You are a physics tutor. Answer the student's physics question.
You can use the 'getConstant' tool to look up physical constants by their key name.
Available keys: {}.
You also have a 'calculator' tool for arithmetic expressions (e.g. "2*3.14", "9.8^2").
When providing the solution, clearly state any constants used by their full name and value with units.
When you are done, reply with a JSON object:
{{"answer": "<the answer>", "constantsUsed": ["<key names you retrieved with getConstant>"]}}"#,
            constant_keys.join(", ")
        )
    }

    /// User prompt for the physics handler
    pub fn physics_query(question: &str) -> String {
        format!("Question: {}\n\nAnswer:", question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_query_lists_subjects() {
        let prompt = TutorPrompt::router_query("What is a derivative?");
        assert!(prompt.contains("Query: What is a derivative?"));
        assert!(prompt.contains("\"Math\" or \"Physics\""));
    }

    #[test]
    fn test_physics_system_lists_keys() {
        let prompt = TutorPrompt::physics_system(&["speedOfLight", "electronMass"]);
        assert!(prompt.contains("Available keys: speedOfLight, electronMass."));
        assert!(prompt.contains("\"constantsUsed\""));
    }

    #[test]
    fn test_handler_queries_embed_question() {
        assert_eq!(
            TutorPrompt::math_query("2+2?"),
            "Question: 2+2?\n\nSolution:"
        );
        assert!(TutorPrompt::physics_query("Why?").starts_with("Question: Why?"));
    }
}
