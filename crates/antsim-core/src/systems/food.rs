//! Food registry - flat, insertion-ordered list of food items

use serde::{Deserialize, Serialize};

use crate::components::Food;

/// All food in the world (singleton-like, stored in engine).
///
/// Iteration order is insertion order; foragers claim the first food in
/// range, so order decides who wins when several items are close.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoodRegistry {
    items: Vec<Food>,
}

impl FoodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, food: Food) {
        self.items.push(food);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Food> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Food> {
        self.items.iter_mut()
    }

    pub fn get(&self, index: usize) -> Option<&Food> {
        self.items.get(index)
    }

    /// Number of items nobody has claimed yet
    pub fn available_count(&self) -> usize {
        self.items.iter().filter(|f| f.is_available()).count()
    }

    /// Drop claimed food, keeping the order of what remains. Returns how many were removed.
    pub fn compact(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|f| f.is_available());
        before - self.items.len()
    }
}

impl<'a> IntoIterator for &'a FoodRegistry {
    type Item = &'a Food;
    type IntoIter = std::slice::Iter<'a, Food>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Vec2;

    #[test]
    fn test_compact_keeps_order() {
        let mut registry = FoodRegistry::new();
        for x in 0..5 {
            registry.push(Food::new(Vec2::new(x as f32, 0.0), 2.0));
        }
        for (idx, food) in registry.iter_mut().enumerate() {
            if idx % 2 == 0 {
                food.claim();
            }
        }
        assert_eq!(registry.available_count(), 2);

        assert_eq!(registry.compact(), 3);
        let xs: Vec<f32> = registry.iter().map(|f| f.position().x).collect();
        assert_eq!(xs, vec![1.0, 3.0]);
        assert_eq!(registry.compact(), 0);
    }
}
