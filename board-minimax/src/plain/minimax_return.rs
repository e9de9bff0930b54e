use std::fmt::{Debug, Display};
use text_trees::StringTreeNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The result of a single search: the backed up score and the action that achieves it
///
/// `action` is only ever `None` when the searched position was a leaf. That is, the depth was
/// zero, the game was already over, or there were no legal actions.
pub struct ScoredAction<ActionType, ScoreType> {
    /// The best score for the maximizing player, or the worst for the minimizing player
    pub score: ScoreType,
    /// The action that leads to `score`
    pub action: Option<ActionType>,
}

#[derive(Debug, Clone)]
/// This is returned from a tree keeping minimax search
/// It contains all the information we generated about the game tree
pub enum MinMaxReturn<ActionType, ScoreType> {
    /// This is a non-leaf node in the game tree
    /// We have information about all the options we looked at as well as the chosen score
    Node {
        /// Whether this node was a maximizing node or not
        is_maximizing: bool,
        /// A 'recursive' look at all the actions under us
        /// This is kept in the order the game enumerated the actions in
        options: Vec<(ActionType, Self)>,
        /// Index into `options` of the action we picked. This is the first action that reached
        /// the chosen score
        chosen: usize,
        /// The chosen score
        /// This always matches the score of `options[chosen]`
        score: ScoreType,
    },
    /// Represents a leaf node in the game tree
    /// This happens when we reach a terminal state (win/lose/draw), when we reach the maximum
    /// depth, or when there were no actions to explore
    Leaf {
        #[allow(missing_docs)]
        score: ScoreType,
    },
}

impl<ActionType, ScoreType> MinMaxReturn<ActionType, ScoreType>
where
    ActionType: Copy + Debug,
    ScoreType: Copy + Debug,
{
    /// Returns the score for this node
    pub fn score(&self) -> &ScoreType {
        match self {
            MinMaxReturn::Node { score, .. } => score,
            MinMaxReturn::Leaf { score } => score,
        }
    }

    /// Returns the action chosen at this node
    /// If we are a leaf node, this will return None
    pub fn best_action(&self) -> Option<ActionType> {
        match self {
            MinMaxReturn::Leaf { .. } => None,
            MinMaxReturn::Node {
                options, chosen, ..
            } => options.get(*chosen).map(|(action, _)| *action),
        }
    }

    /// Collapse the tree into the pair a plain search returns
    pub fn scored_action(&self) -> ScoredAction<ActionType, ScoreType> {
        ScoredAction {
            score: *self.score(),
            action: self.best_action(),
        }
    }

    /// Returns all the actions in the 'route' through the game tree that minimax took
    /// This is useful for debugging as it shows the line of play both sides were expected to
    /// follow
    pub fn chosen_route(&self) -> Vec<ActionType> {
        match self {
            MinMaxReturn::Leaf { .. } => vec![],
            MinMaxReturn::Node {
                options, chosen, ..
            } => {
                if let Some((action, child)) = options.get(*chosen) {
                    let mut tail = child.chosen_route();
                    tail.insert(0, *action);
                    tail
                } else {
                    vec![]
                }
            }
        }
    }

    /// The number of positions in this tree, including this one
    pub fn node_count(&self) -> usize {
        match self {
            MinMaxReturn::Leaf { .. } => 1,
            MinMaxReturn::Node { options, .. } => {
                1 + options
                    .iter()
                    .map(|(_, child)| child.node_count())
                    .sum::<usize>()
            }
        }
    }
}

impl<ActionType, ScoreType> MinMaxReturn<ActionType, ScoreType>
where
    ActionType: Copy + Debug + Display,
    ScoreType: Copy + Debug,
{
    /// This returns a visual representation of the game tree that minimax generated
    /// It shows the score at each level, with the chosen action marked with a `*`
    pub fn to_text_tree(&self) -> String {
        format!("{}", self.to_text_tree_node("root".to_owned()))
    }

    fn to_text_tree_node(&self, label: String) -> StringTreeNode {
        match self {
            MinMaxReturn::Leaf { score } => StringTreeNode::new(format!("{} {:?}", label, score)),
            MinMaxReturn::Node {
                options,
                chosen,
                score,
                is_maximizing,
            } => {
                let kind = if *is_maximizing { "max" } else { "min" };
                let mut node = StringTreeNode::new(format!("{} {} {:?}", label, kind, score));
                for (i, (action, result)) in options.iter().enumerate() {
                    let marker = if i == *chosen { "*" } else { "" };
                    node.push_node(result.to_text_tree_node(format!("{}{}", action, marker)));
                }

                node
            }
        }
    }
}
