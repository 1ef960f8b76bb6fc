use serde::Serialize;

/// A parse tree node.
///
/// Leaves carry the text they matched and the token class that matched it. A leaf spelled
/// out by several tokens (a multi-character literal over single-character tokens) has no
/// class. The empty leaf is what an epsilon alternative produces.
///
/// Left-recursive rules nest as deep as the input is long, so traversal, comparison and
/// dropping walk the tree with an explicit stack. The derived `Clone`, `Debug` and
/// `Serialize` still recurse once per level.
#[derive(Debug, Clone, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Leaf {
        value: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        class: Option<String>,
    },
    Branch {
        rule: String,
        children: Vec<Node>,
    },
}

/// Pending work while reducing a tree to its AST.
enum AstStep {
    Reduce(Node),
    Assemble { rule: String, arity: usize },
}

impl Node {
    pub fn leaf(value: impl Into<String>, class: Option<String>) -> Self {
        Node::Leaf {
            value: value.into(),
            class,
        }
    }

    pub fn branch(rule: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Branch {
            rule: rule.into(),
            children,
        }
    }

    pub fn epsilon() -> Self {
        Node::leaf("", None)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf { .. })
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, Node::Branch { .. })
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, Node::Leaf { value, .. } if value.is_empty())
    }

    /// The rule name of a branch.
    pub fn rule(&self) -> Option<&str> {
        match self {
            Node::Branch { rule, .. } => Some(rule),
            Node::Leaf { .. } => None,
        }
    }

    /// The token class of a leaf.
    pub fn class(&self) -> Option<&str> {
        match self {
            Node::Leaf { class, .. } => class.as_deref(),
            Node::Branch { .. } => None,
        }
    }

    /// What an evaluator dispatches on: the rule of a branch, the class of a leaf.
    pub fn label(&self) -> Option<&str> {
        self.rule().or_else(|| self.class())
    }

    /// The text of a leaf.
    pub fn value(&self) -> Option<&str> {
        match self {
            Node::Leaf { value, .. } => Some(value),
            Node::Branch { .. } => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Branch { children, .. } => children,
            Node::Leaf { .. } => &[],
        }
    }

    /// Leaves from left to right.
    fn leaf_values(&self) -> impl Iterator<Item = &str> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            while let Some(node) = stack.pop() {
                match node {
                    Node::Leaf { value, .. } => return Some(value.as_str()),
                    Node::Branch { children, .. } => stack.extend(children.iter().rev()),
                }
            }
            None
        })
    }

    /// All leaf values in order, concatenated.
    pub fn text(&self) -> String {
        self.leaf_values().collect()
    }

    /// Leaf values in order, skipping empty leaves.
    pub fn leaves(&self) -> Vec<&str> {
        self.leaf_values().filter(|v| !v.is_empty()).collect()
    }

    /// Reduce a concrete parse tree to an AST.
    ///
    /// Chains of single-child nodes collapse into the innermost child (an epsilon child
    /// does not collapse its parent). Then only children that were branches are kept,
    /// each reduced the same way; children that reduce to an empty leaf are dropped.
    /// Literal punctuation disappears; token-class leaves survive through the rule that
    /// wrapped them.
    pub fn into_ast(self) -> Node {
        let mut steps = vec![AstStep::Reduce(self)];
        let mut done: Vec<Node> = Vec::new();
        while let Some(step) = steps.pop() {
            match step {
                AstStep::Reduce(node) => {
                    let mut node = node.collapse();
                    if let Node::Branch { rule, children } = &mut node {
                        let kept: Vec<Node> = std::mem::take(children)
                            .into_iter()
                            .filter(Node::is_branch)
                            .collect();
                        steps.push(AstStep::Assemble {
                            rule: std::mem::take(rule),
                            arity: kept.len(),
                        });
                        steps.extend(kept.into_iter().rev().map(AstStep::Reduce));
                    } else {
                        done.push(node);
                    }
                }
                AstStep::Assemble { rule, arity } => {
                    let children: Vec<Node> = done
                        .split_off(done.len() - arity)
                        .into_iter()
                        .filter(|child| !child.is_epsilon())
                        .collect();
                    done.push(Node::branch(rule, children));
                }
            }
        }
        done.pop().unwrap_or_else(Node::epsilon)
    }

    /// Follow single, non-epsilon children down to the innermost node.
    fn collapse(mut self) -> Node {
        loop {
            let next = match &mut self {
                Node::Branch { children, .. }
                    if children.len() == 1 && !children[0].is_epsilon() =>
                {
                    children.pop()
                }
                _ => None,
            };
            match next {
                Some(child) => self = child,
                None => return self,
            }
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        let mut pairs = vec![(self, other)];
        while let Some(pair) = pairs.pop() {
            match pair {
                (Node::Leaf { value: a, class: x }, Node::Leaf { value: b, class: y }) => {
                    if a != b || x != y {
                        return false;
                    }
                }
                (
                    Node::Branch { rule: a, children: xs },
                    Node::Branch { rule: b, children: ys },
                ) => {
                    if a != b || xs.len() != ys.len() {
                        return false;
                    }
                    pairs.extend(xs.iter().zip(ys.iter()));
                }
                _ => return false,
            }
        }
        true
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        let Node::Branch { children, .. } = self else {
            return;
        };
        let mut pending = std::mem::take(children);
        while let Some(mut node) = pending.pop() {
            if let Node::Branch { children, .. } = &mut node {
                pending.append(children);
            }
        }
    }
}
