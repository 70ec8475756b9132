use criterion::{Criterion, criterion_group, criterion_main};
use quizgen::llm::extract_quiz;
use std::hint::black_box;

fn question_list(count: usize) -> String {
    let questions: Vec<String> = (1..=count)
        .map(|n| {
            format!(
                r#"{{"question": "Sample question {n}?", "options": ["A. alpha", "B. beta", "C. gamma", "D. delta"], "correct_answer": "C"}}"#
            )
        })
        .collect();
    format!("[{}]", questions.join(", "))
}

fn bench_extract_quiz(c: &mut Criterion) {
    let bare = question_list(10);
    let wrapped = format!(
        "Here is your quiz, formatted as requested:\n\n```json\n{bare}\n```\n\nLet me know if you want [more]!"
    );

    c.bench_function("extract_quiz_whole_body", |b| {
        b.iter(|| extract_quiz(black_box(&bare)).expect("bare list parses"))
    });
    c.bench_function("extract_quiz_embedded", |b| {
        b.iter(|| extract_quiz(black_box(&wrapped)).expect("embedded list parses"))
    });
}

criterion_group!(benches, bench_extract_quiz);
criterion_main!(benches);
