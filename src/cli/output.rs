//! Output formatting for the CLI

use crate::{
    pipeline::{PlaybackOutcome, PlaybackTrace, TrainingResult},
    q_learning::QTable,
};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n--- {title} ---");
}

/// Print the Q-table as a fixed-width table, one row per state
pub fn print_q_table(q_table: &QTable) {
    print_section("Q-Table");
    println!(
        "{:>12}{:>10}{:>10}{:>10}{:>10}",
        "State", "Up", "Down", "Left", "Right"
    );
    for state in 0..q_table.num_states() {
        let row = q_table.row(state);
        println!(
            "{state:>12}{:>10.2}{:>10.2}{:>10.2}{:>10.2}",
            row[0], row[1], row[2], row[3]
        );
    }
}

/// Print the training summary stats
pub fn print_training_result(result: &TrainingResult) {
    print_section("Training Complete");
    println!("Total episodes: {}", result.total_episodes);
    println!(
        "Goal reached:   {} ({:.1}%)",
        result.goal_episodes,
        result.goal_rate * 100.0
    );
    println!(
        "Monster hits:   {} ({:.1}%)",
        result.monster_episodes,
        result.monster_rate * 100.0
    );
    println!(
        "Step-cap stops: {} ({:.1}%)",
        result.step_cap_episodes,
        result.step_cap_rate * 100.0
    );
    println!("Final epsilon:  {:.4}", result.final_epsilon);
}

/// Print the step-by-step playback trace
pub fn print_playback_trace(trace: &PlaybackTrace) {
    print_section("Playing Game with Learned Policy");

    for step in &trace.steps {
        println!(
            "Step {}: At state ({},{}) which is '{}'",
            step.step + 1,
            step.from.0,
            step.from.1,
            step.from_cell
        );
        println!("  Choosing action: {}", step.action);
        let slip_note = if step.slipped { " (slipped)" } else { "" };
        println!(
            "  Moved to state ({},{}) which is '{}'{slip_note}",
            step.to.0, step.to.1, step.to_cell
        );
        if step.hit_wall {
            println!("  Hit a wall and stayed in place");
        }
    }

    match trace.outcome {
        PlaybackOutcome::GoalReached => {
            println!(
                "At state ({},{}) which is '{}'",
                trace.final_state.0, trace.final_state.1, trace.final_cell
            );
            println!("Goal reached!");
        }
        PlaybackOutcome::EatenByMonster => {
            println!(
                "At state ({},{}) which is '{}'",
                trace.final_state.0, trace.final_state.1, trace.final_cell
            );
            println!("Oops! Eaten by a monster!");
        }
        PlaybackOutcome::StepCapReached => {
            println!("Max steps reached. Did not find goal or monster.");
        }
    }
}
