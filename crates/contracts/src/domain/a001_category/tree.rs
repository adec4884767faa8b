//! Дерево категорий (родитель / подкатегории) поверх плоского списка.

use super::aggregate::{Category, CategoryId, CategoryViolation};
use crate::domain::common::AggregateId;
use std::collections::{HashMap, HashSet};

pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Узел для отрисовки вложенного списка
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryNode<'a> {
    pub category: &'a Category,
    pub children: Vec<CategoryNode<'a>>,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryTree {
    categories: Vec<Category>,
    index: HashMap<CategoryId, usize>,
    children: HashMap<CategoryId, Vec<usize>>,
    roots: Vec<usize>,
}

impl CategoryTree {
    /// Построить дерево. Категории, чей родитель отсутствует в списке,
    /// попадают в корень.
    pub fn new(mut categories: Vec<Category>) -> Self {
        categories.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));

        let index: HashMap<CategoryId, usize> = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.base.id, i))
            .collect();

        let mut children: HashMap<CategoryId, Vec<usize>> = HashMap::new();
        let mut roots = Vec::new();
        for (i, category) in categories.iter().enumerate() {
            match category.parent {
                Some(parent) if parent != category.base.id && index.contains_key(&parent) => {
                    children.entry(parent).or_default().push(i)
                }
                _ => roots.push(i),
            }
        }

        Self {
            categories,
            index,
            children,
            roots,
        }
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn all(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.index.get(&id).map(|&i| &self.categories[i])
    }

    /// Найти по строковому ID (как он приходит из формы или товара)
    pub fn find(&self, raw_id: &str) -> Option<&Category> {
        CategoryId::from_string(raw_id)
            .ok()
            .and_then(|id| self.get(id))
    }

    /// Заголовок категории или "Unknown"
    pub fn title_of(&self, raw_id: &str) -> String {
        self.find(raw_id)
            .map(|c| c.title.clone())
            .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string())
    }

    /// Корневые категории (верхнего уровня и "осиротевшие")
    pub fn roots(&self) -> Vec<&Category> {
        self.roots.iter().map(|&i| &self.categories[i]).collect()
    }

    /// Только настоящие категории верхнего уровня
    pub fn top_level(&self) -> Vec<&Category> {
        self.categories.iter().filter(|c| c.is_top_level()).collect()
    }

    pub fn sub_categories(&self, parent: CategoryId) -> Vec<&Category> {
        self.children
            .get(&parent)
            .map(|ids| ids.iter().map(|&i| &self.categories[i]).collect())
            .unwrap_or_default()
    }

    /// ID категории и всех её потомков
    pub fn descendants_of(&self, id: CategoryId) -> HashSet<CategoryId> {
        let mut seen = HashSet::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            for child in self.sub_categories(current) {
                stack.push(child.base.id);
            }
        }
        seen
    }

    /// Станет ли `parent` родителем `id` ценой цикла
    pub fn would_create_cycle(&self, id: CategoryId, parent: CategoryId) -> bool {
        self.descendants_of(id).contains(&parent)
    }

    /// Проверить ссылку на родителя для категории `editing` (или новой)
    pub fn check_parent(
        &self,
        editing: Option<CategoryId>,
        parent: Option<CategoryId>,
    ) -> Result<(), CategoryViolation> {
        let Some(parent) = parent else {
            return Ok(());
        };
        if editing == Some(parent) {
            return Err(CategoryViolation::SelfParent);
        }
        if self.get(parent).is_none() {
            return Err(CategoryViolation::UnknownParent);
        }
        if let Some(id) = editing {
            if self.would_create_cycle(id, parent) {
                return Err(CategoryViolation::ParentCycle);
            }
        }
        Ok(())
    }

    /// Варианты для выбора родителя.
    ///
    /// Для новой категории только верхний уровень. При редактировании
    /// все, кроме самой категории и её потомков.
    pub fn parent_options(&self, editing: Option<CategoryId>) -> Vec<&Category> {
        match editing {
            None => self.top_level(),
            Some(id) => {
                let excluded = self.descendants_of(id);
                self.categories
                    .iter()
                    .filter(|c| !excluded.contains(&c.base.id))
                    .collect()
            }
        }
    }

    /// Вложенная структура для отрисовки
    pub fn nodes(&self) -> Vec<CategoryNode<'_>> {
        fn build<'a>(tree: &'a CategoryTree, index: usize, depth: usize) -> CategoryNode<'a> {
            let category = &tree.categories[index];
            // Повреждённые данные с циклом не должны уводить в бесконечную рекурсию
            let children = if depth < tree.categories.len() {
                tree.children
                    .get(&category.base.id)
                    .map(|ids| ids.iter().map(|&i| build(tree, i, depth + 1)).collect())
                    .unwrap_or_default()
            } else {
                Vec::new()
            };
            CategoryNode { category, children }
        }

        self.roots.iter().map(|&i| build(self, i, 0)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_category::aggregate::CategoryStatus;
    use crate::domain::common::EntityMetadata;

    fn cat(title: &str, parent: Option<CategoryId>) -> Category {
        Category::with_metadata(
            CategoryId::new_v4(),
            title,
            None,
            CategoryStatus::Active,
            parent,
            EntityMetadata::new("Admin"),
        )
    }

    fn sample() -> (CategoryTree, CategoryId, CategoryId, CategoryId) {
        let electronics = cat("Electronics", None);
        let phones = cat("Smartphones", Some(electronics.base.id));
        let cases = cat("Cases", Some(phones.base.id));
        let clothing = cat("clothing", None);
        let ids = (electronics.base.id, phones.base.id, cases.base.id);
        let tree = CategoryTree::new(vec![cases, clothing, phones, electronics]);
        (tree, ids.0, ids.1, ids.2)
    }

    #[test]
    fn roots_are_sorted_case_insensitively() {
        let (tree, ..) = sample();
        let titles: Vec<_> = tree.roots().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["clothing", "Electronics"]);
    }

    #[test]
    fn sub_categories_of_parent() {
        let (tree, electronics, phones, _) = sample();
        let subs = tree.sub_categories(electronics);
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].base.id, phones);
    }

    #[test]
    fn title_lookup_falls_back_to_unknown() {
        let (tree, electronics, ..) = sample();
        assert_eq!(tree.title_of(&electronics.as_string()), "Electronics");
        assert_eq!(tree.title_of("temp_1"), UNKNOWN_CATEGORY);
        assert_eq!(tree.title_of(&CategoryId::new_v4().as_string()), UNKNOWN_CATEGORY);
    }

    #[test]
    fn orphans_are_rendered_at_root() {
        let orphan = cat("Orphan", Some(CategoryId::new_v4()));
        let tree = CategoryTree::new(vec![orphan]);
        assert_eq!(tree.roots().len(), 1);
        assert!(tree.top_level().is_empty());
    }

    #[test]
    fn cycles_and_self_reference_are_detected() {
        let (tree, electronics, phones, cases) = sample();
        assert!(tree.would_create_cycle(electronics, cases));
        assert!(!tree.would_create_cycle(cases, electronics));
        assert_eq!(
            tree.check_parent(Some(electronics), Some(cases)),
            Err(CategoryViolation::ParentCycle)
        );
        assert_eq!(
            tree.check_parent(Some(phones), Some(phones)),
            Err(CategoryViolation::SelfParent)
        );
        assert_eq!(
            tree.check_parent(None, Some(CategoryId::new_v4())),
            Err(CategoryViolation::UnknownParent)
        );
        assert!(tree.check_parent(Some(cases), Some(electronics)).is_ok());
        assert!(tree.check_parent(Some(cases), None).is_ok());
    }

    #[test]
    fn parent_options_exclude_descendants_when_editing() {
        let (tree, electronics, ..) = sample();
        let options: Vec<_> = tree
            .parent_options(Some(electronics))
            .iter()
            .map(|c| c.title.as_str())
            .collect();
        assert_eq!(options, ["clothing"]);

        let for_new: Vec<_> = tree.parent_options(None).iter().map(|c| c.title.as_str()).collect();
        assert_eq!(for_new, ["clothing", "Electronics"]);
    }

    #[test]
    fn nodes_nest_children() {
        let (tree, ..) = sample();
        let nodes = tree.nodes();
        let electronics = nodes.iter().find(|n| n.category.title == "Electronics").unwrap();
        assert_eq!(electronics.children.len(), 1);
        assert_eq!(electronics.children[0].children[0].category.title, "Cases");
    }
}
