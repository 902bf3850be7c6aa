//! Built-in prompt templates for the Solver and Critic personas.
//!
//! The persona wording carries the protocol rules: the Solver must not emit
//! `<FINAL>` before agreement, the Critic must open with `<AGREE>false</AGREE>`
//! and only flip to `true` when genuinely convinced. Few-shot exemplars
//! reinforce both behaviors.

use duel_application::PromptProvider;
use duel_domain::{Message, Speaker, Turn};

const SOLVER_SYSTEM_PROMPT: &str = "\
You are the Solver, a rigorous mathematician and primary problem solver. Your role is to:

1. Compute mathematical expressions accurately using step-by-step reasoning
2. Present your solution with clear, logical arguments
3. Persuade the Critic (your debate partner) that your answer is correct
4. NEVER reveal the final answer with <FINAL>answer</FINAL> until the Critic explicitly agrees with <AGREE>true</AGREE>
5. Keep responses concise but thorough
6. Use step-wise reasoning and show your work
7. Be confident but respectful in your argumentation

CRITICAL RULES:
- Do NOT output <FINAL>answer</FINAL> until the Critic says <AGREE>true</AGREE>
- Always explain your mathematical reasoning clearly
- If the Critic disagrees, provide additional evidence or alternative explanations
- Stay focused on the mathematical problem at hand
- Be persuasive but not condescending";

const CRITIC_SYSTEM_PROMPT: &str = "\
You are the Critic, a meticulous mathematical reviewer and adversarial skeptic. Your role is to:

1. ALWAYS start your first response with <AGREE>false</AGREE> followed by a critique
2. Scrutinize the Solver's mathematical reasoning for errors, oversights, or unclear explanations
3. Challenge assumptions and demand rigorous proof
4. Only concede with <AGREE>true</AGREE> when you are genuinely convinced the solution is correct
5. Keep responses concise but thorough
6. Be skeptical but fair in your analysis

CRITICAL RULES:
- Your FIRST response must ALWAYS include <AGREE>false</AGREE>
- Only use <AGREE>true</AGREE> when you are completely satisfied with the solution
- Focus on mathematical accuracy, not personality conflicts
- Ask for clarification when reasoning is unclear
- Point out specific errors or gaps in logic";

const SOLVER_EXAMPLES: &[(&str, &str)] = &[
    (
        "Calculate 5 * 6 + 2",
        "I need to solve 5 * 6 + 2. Using the order of operations (PEMDAS), I first perform \
         multiplication: 5 * 6 = 30. Then I add: 30 + 2 = 32. The answer is 32 because \
         multiplication has higher precedence than addition.",
    ),
    (
        "What is the square root of 16?",
        "To find the square root of 16, I need to determine what number multiplied by itself \
         equals 16. Since 4 x 4 = 16, the principal square root of 16 is 4. This can be \
         verified: 4^2 = 16. The answer is 4.",
    ),
];

const CRITIC_EXAMPLES: &[(&str, &str)] = &[
    (
        "I need to solve 5 * 6 + 2. Using the order of operations (PEMDAS), I first perform \
         multiplication: 5 * 6 = 30. Then I add: 30 + 2 = 32.",
        "<AGREE>false</AGREE> While you correctly identified PEMDAS, I want to verify your \
         arithmetic. Can you double-check that 5 * 6 actually equals 30? Also confirm that \
         there are no parentheses that might change the precedence in this expression.",
    ),
    (
        "To find the square root of 16, I need to determine what number multiplied by itself \
         equals 16. Since 4 x 4 = 16, the square root of 16 is 4.",
        "<AGREE>false</AGREE> You've identified one square root, but both positive and negative \
         numbers can square to 16. Shouldn't we consider that (-4) x (-4) = 16 as well? Are we \
         after the principal square root or all square roots?",
    ),
];

/// Prompt provider with fixed personas and few-shot exemplars.
#[derive(Debug, Default)]
pub struct StaticPromptProvider;

impl StaticPromptProvider {
    pub fn new() -> Self {
        Self
    }

    /// History as seen by the Solver: own turns become assistant messages,
    /// Critic turns arrive as quoted user messages.
    fn solver_history(turns: &[Turn]) -> impl Iterator<Item = Message> + '_ {
        turns.iter().map(|turn| match turn.speaker {
            Speaker::Solver => Message::assistant(turn.content.clone()),
            Speaker::Critic => Message::user(format!("Critic says: {}", turn.content)),
        })
    }

    /// History as seen by the Critic: Solver turns arrive quoted, own turns
    /// become assistant messages.
    fn critic_history(turns: &[Turn]) -> impl Iterator<Item = Message> + '_ {
        turns.iter().map(|turn| match turn.speaker {
            Speaker::Solver => Message::user(format!("Solver says: {}", turn.content)),
            Speaker::Critic => Message::assistant(turn.content.clone()),
        })
    }
}

impl PromptProvider for StaticPromptProvider {
    fn solver_messages(&self, expression: &str, turns: &[Turn]) -> Vec<Message> {
        let mut messages = vec![Message::system(SOLVER_SYSTEM_PROMPT)];
        for (user, assistant) in SOLVER_EXAMPLES {
            messages.push(Message::user(*user));
            messages.push(Message::assistant(*assistant));
        }
        // The expression stays present in every round, not just the first.
        messages.push(Message::user(format!("Calculate: {expression}")));
        messages.extend(Self::solver_history(turns));
        messages
    }

    fn critic_messages(&self, expression: &str, turns: &[Turn]) -> Vec<Message> {
        let mut messages = vec![Message::system(CRITIC_SYSTEM_PROMPT)];
        for (solver, assistant) in CRITIC_EXAMPLES {
            messages.push(Message::user(format!("Solver says: {solver}")));
            messages.push(Message::assistant(*assistant));
        }
        messages.push(Message::user(format!(
            "The expression under review is: {expression}"
        )));
        messages.extend(Self::critic_history(turns));
        messages
    }

    fn finalization_messages(&self, expression: &str, turns: &[Turn]) -> Vec<Message> {
        let agreement = turns
            .iter()
            .rev()
            .find(|t| t.speaker == Speaker::Critic)
            .map_or(String::new(), |t| t.content.clone());
        let mut messages = self.solver_messages(expression, turns);
        messages.push(Message::user(format!(
            "The Critic has agreed: {agreement}. Please provide your final answer using the \
             format <FINAL>answer</FINAL>."
        )));
        messages
    }
}
