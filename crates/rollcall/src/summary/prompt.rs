//! Prompt template for record summaries.

use crate::record::Record;

/// Build the generator prompt for a record.
///
/// The output depends only on the record, so the same record always yields
/// the same prompt.
pub fn build_prompt(record: &Record) -> String {
    format!(
        "\
Write a brief, formal description of this student as plain text.

Student details:
- Name: {name}
- Age: {age}
- Email: {email}
- Student ID: {id}

Keep it concise and professional. Do not use markdown, bullet symbols, \
links, or any other markup; write ordinary sentences only.",
        name = record.name,
        age = record.age,
        email = record.email,
        id = record.id,
    )
}
