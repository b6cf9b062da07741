//! Ordered, named rule chains.
//!
//! Block, inline and post-processing passes are plain function pointers kept
//! in a [`Ruler`]. Order is precedence: the first rule that accepts the
//! current position wins. A rule can also be listed in "alt" chains, which is
//! how block rules declare that they may interrupt a paragraph.

use crate::error::ParseError;

struct Rule<F> {
    name: &'static str,
    enabled: bool,
    func: F,
    alt: &'static [&'static str],
}

pub struct Ruler<F> {
    rules: Vec<Rule<F>>,
}

impl<F: Copy> Ruler<F> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule at the end of the chain.
    pub fn push(&mut self, name: &'static str, func: F) {
        self.push_with_alt(name, func, &[]);
    }

    pub fn push_with_alt(&mut self, name: &'static str, func: F, alt: &'static [&'static str]) {
        self.rules.push(Rule {
            name,
            enabled: true,
            func,
            alt,
        });
    }

    /// Inserts a rule right before `anchor`.
    pub fn before(
        &mut self,
        anchor: &str,
        name: &'static str,
        func: F,
        alt: &'static [&'static str],
    ) -> Result<(), ParseError> {
        let index = self.find(anchor)?;
        self.rules.insert(
            index,
            Rule {
                name,
                enabled: true,
                func,
                alt,
            },
        );
        Ok(())
    }

    pub fn disable(&mut self, name: &str) -> Result<(), ParseError> {
        let index = self.find(name)?;
        self.rules[index].enabled = false;
        Ok(())
    }

    pub fn enable(&mut self, name: &str) -> Result<(), ParseError> {
        let index = self.find(name)?;
        self.rules[index].enabled = true;
        Ok(())
    }

    /// Enabled rules of the main chain, in order.
    pub fn rules(&self) -> impl Iterator<Item = F> + '_ {
        self.rules.iter().filter(|r| r.enabled).map(|r| r.func)
    }

    /// Enabled rules that are also members of the `chain` alt chain.
    pub fn rules_for<'a>(&'a self, chain: &'a str) -> impl Iterator<Item = F> + 'a {
        self.rules
            .iter()
            .filter(move |r| r.enabled && r.alt.iter().any(|alt| *alt == chain))
            .map(|r| r.func)
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules
            .iter()
            .filter(|r| r.enabled)
            .map(|r| r.name)
            .collect()
    }

    fn find(&self, name: &str) -> Result<usize, ParseError> {
        self.rules
            .iter()
            .position(|r| r.name == name)
            .ok_or_else(|| ParseError::UnknownRule(name.to_string()))
    }
}

impl<F: Copy> Default for Ruler<F> {
    fn default() -> Self {
        Self::new()
    }
}
