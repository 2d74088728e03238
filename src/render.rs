use std::fmt::{Display, Formatter};

use crate::skiplist::{NodeRef, SearchResult, SkipList};

/// Text picture of a list, one row per active level, top level first:
///
/// ```text
/// Level 1: HEAD -> 25 -> NIL
/// Level 0: HEAD -> 15 -> 25 -> 35 -> NIL
/// ```
///
/// With a search result attached, stands on the search path are shown as `(25)` and the found
/// node as `[35]` on every level it occupies.
pub struct Rendering<'a, K, G> {
    list: &'a SkipList<K, G>,
    search: Option<&'a SearchResult<'a, K>>,
}

pub fn render<K, G>(list: &SkipList<K, G>) -> Rendering<'_, K, G> {
    Rendering { list, search: None }
}

impl<'a, K, G> Rendering<'a, K, G> {
    pub fn highlight(mut self, search: &'a SearchResult<'a, K>) -> Self {
        self.search = Some(search);
        self
    }

    fn on_path(&self, level: usize, node: &NodeRef<'_, K>) -> bool {
        self.search.map_or(false, |s| {
            s.path.iter().any(|step| step.level == level && step.node == *node)
        })
    }

    fn is_found(&self, level: usize, node: &NodeRef<'_, K>) -> bool {
        self.search
            .and_then(|s| s.node.as_ref())
            .map_or(false, |found| found == node && level <= found.level())
    }
}

impl<K: Display, G> Display for Rendering<'_, K, G> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for level in (0..=self.list.level()).rev() {
            write!(f, "Level {}:", level)?;
            let mut current = Some(self.list.header());
            let mut first = true;
            while let Some(node) = current {
                f.write_str(if first { " " } else { " -> " })?;
                first = false;
                if self.is_found(level, &node) {
                    write!(f, "[{}]", node.key())?;
                } else if self.on_path(level, &node) {
                    write!(f, "({})", node.key())?;
                } else {
                    write!(f, "{}", node.key())?;
                }
                current = node.next(level);
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<K: Display, G> Display for SkipList<K, G> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        render(self).fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::render;
    use crate::skiplist::SkipList;

    fn make_skiplist() -> SkipList<i64, impl FnMut(usize) -> usize + Clone> {
        let mut script = vec![0, 1, 0].into_iter();
        let mut list = SkipList::with_generator(15, move |_: usize| script.next().unwrap_or(0))
            .unwrap();
        for k in [15, 25, 35] {
            list.insert(k);
        }
        list
    }

    #[test]
    fn test_plain_rendering() {
        let list = make_skiplist();
        assert_eq!(
            list.to_string(),
            "Level 1: HEAD -> 25 -> NIL\nLevel 0: HEAD -> 15 -> 25 -> 35 -> NIL\n"
        );
    }

    #[test]
    fn test_empty_rendering() {
        let list: SkipList<i64> = SkipList::new();
        assert_eq!(list.to_string(), "Level 0: HEAD -> NIL\n");
    }

    #[test]
    fn test_highlighted_found() {
        let list = make_skiplist();
        let result = list.search(&25);
        assert_eq!(
            render(&list).highlight(&result).to_string(),
            "Level 1: (HEAD) -> [25] -> NIL\nLevel 0: HEAD -> 15 -> [25] -> 35 -> NIL\n"
        );
    }

    #[test]
    fn test_highlighted_missing() {
        let list = make_skiplist();
        let result = list.search(&30);
        assert_eq!(
            render(&list).highlight(&result).to_string(),
            "Level 1: (HEAD) -> (25) -> NIL\nLevel 0: HEAD -> 15 -> (25) -> 35 -> NIL\n"
        );
    }
}
