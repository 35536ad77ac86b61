use super::statement::{ParamRef, Statement};

/// Ordered statement sequence forming one candidate solution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Genome {
    statements: Vec<Statement>,
}

impl Genome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a statement and returns its position for use as a parameter
    /// reference.
    pub fn push(&mut self, statement: Statement) -> ParamRef {
        self.statements.push(statement);
        ParamRef(self.statements.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn statement(&self, position: usize) -> Option<&Statement> {
        self.statements.get(position)
    }

    pub fn statement_mut(&mut self, position: usize) -> Option<&mut Statement> {
        self.statements.get_mut(position)
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn statements_mut(&mut self) -> &mut [Statement] {
        &mut self.statements
    }

    /// Splits off the tail starting at `at`, leaving the head in place.
    /// Structural crossover swaps tails between two genomes with this.
    pub fn split_off(&mut self, at: usize) -> Vec<Statement> {
        self.statements.split_off(at)
    }

    pub fn append_tail(&mut self, tail: Vec<Statement>) {
        self.statements.extend(tail);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_returns_the_new_position() {
        let mut genome = Genome::new();
        let first = genome.push(Statement::String("a".to_string()));
        let second = genome.push(Statement::String("b".to_string()));
        assert_eq!(first.position(), 0);
        assert_eq!(second.position(), 1);
        assert_eq!(genome.len(), 2);
    }

    #[test]
    fn tail_split_and_append_swap_segments() {
        let mut left = Genome::new();
        left.push(Statement::String("l0".to_string()));
        left.push(Statement::String("l1".to_string()));

        let mut right = Genome::new();
        right.push(Statement::String("r0".to_string()));
        right.push(Statement::String("r1".to_string()));

        let left_tail = left.split_off(1);
        let right_tail = right.split_off(1);
        left.append_tail(right_tail);
        right.append_tail(left_tail);

        assert_eq!(
            left.statement(1),
            Some(&Statement::String("r1".to_string()))
        );
        assert_eq!(
            right.statement(1),
            Some(&Statement::String("l1".to_string()))
        );
    }

    #[test]
    fn out_of_range_lookup_is_none() {
        let genome = Genome::new();
        assert!(genome.statement(0).is_none());
    }
}
