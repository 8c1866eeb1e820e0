//! Regroupement des adresses par catégorie et tri reproductible

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::feature::{AddressFeature, Category};

/// Collections d'adresses indexées par "Commune/Localité"
#[derive(Debug, Default)]
pub struct FeatureCollections {
    collections: BTreeMap<String, Vec<AddressFeature>>,
}

impl FeatureCollections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute une adresse en fin de collection (créée au premier ajout)
    pub fn insert(&mut self, category: &Category, feature: AddressFeature) {
        self.collections
            .entry(category.key())
            .or_default()
            .push(feature);
    }

    /// Trie chaque collection, indépendamment et en parallèle
    pub fn sort(&mut self) {
        self.collections.par_iter_mut().for_each(|(_, features)| {
            let unsorted = std::mem::take(features);
            *features = sort_features(unsorted);
        });
    }

    /// Nombre de catégories
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Nombre total d'adresses
    pub fn feature_count(&self) -> usize {
        self.collections.values().map(Vec::len).sum()
    }

    pub fn get(&self, category: &str) -> Option<&[AddressFeature]> {
        self.collections.get(category).map(Vec::as_slice)
    }

    /// Collections par ordre alphabétique de catégorie
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[AddressFeature])> {
        self.collections
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Regroupe puis trie des adresses résolues
pub fn group_and_sort<I>(features: I) -> FeatureCollections
where
    I: IntoIterator<Item = (Category, AddressFeature)>,
{
    let mut collections = FeatureCollections::new();
    for (category, feature) in features {
        collections.insert(&category, feature);
    }
    collections.sort();
    collections
}

/// Tri stable par code postal, rue, localité, numéro normalisé
pub fn sort_features(features: Vec<AddressFeature>) -> Vec<AddressFeature> {
    merge_sort_by(features, &|a: &AddressFeature, b: &AddressFeature| {
        a.sort_key().compare(b.sort_key())
    })
}

/// Tri fusion stable
///
/// Un tag absent est égal à tout, la comparaison n'est donc pas un ordre
/// total : `slice::sort_by` peut paniquer dans ce cas.
fn merge_sort_by<T, F>(mut items: Vec<T>, compare: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }

    let right = items.split_off(items.len() / 2);
    let left = merge_sort_by(items, compare);
    let right = merge_sort_by(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(r, l) == Ordering::Less,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        let next = if take_right { right.next() } else { left.next() };
        merged.extend(next);
    }

    merged
}
