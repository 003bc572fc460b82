/// Number of classes the model was trained on.
pub const NUM_CLASSES: usize = 38;

/// PlantVillage class names in model output order.
///
/// Index `i` of the model's output row corresponds to `CLASS_NAMES[i]`.
pub const CLASS_NAMES: [&str; NUM_CLASSES] = [
    "Apple___Apple_scab",
    "Apple___Black_rot",
    "Apple___Cedar_apple_rust",
    "Apple___healthy",
    "Blueberry___healthy",
    "Cherry_(including_sour)___Powdery_mildew",
    "Cherry_(including_sour)___healthy",
    "Corn_(maize)___Cercospora_leaf_spot Gray_leaf_spot",
    "Corn_(maize)___Common_rust_",
    "Corn_(maize)___Northern_Leaf_Blight",
    "Corn_(maize)___healthy",
    "Grape___Black_rot",
    "Grape___Esca_(Black_Measles)",
    "Grape___Leaf_blight_(Isariopsis_Leaf_Spot)",
    "Grape___healthy",
    "Orange___Haunglongbing_(Citrus_greening)",
    "Peach___Bacterial_spot",
    "Peach___healthy",
    "Pepper,_bell___Bacterial_spot",
    "Pepper,_bell___healthy",
    "Potato___Early_blight",
    "Potato___Late_blight",
    "Potato___healthy",
    "Raspberry___healthy",
    "Soybean___healthy",
    "Squash___Powdery_mildew",
    "Strawberry___Leaf_scorch",
    "Strawberry___healthy",
    "Tomato___Bacterial_spot",
    "Tomato___Early_blight",
    "Tomato___Late_blight",
    "Tomato___Leaf_Mold",
    "Tomato___Septoria_leaf_spot",
    "Tomato___Spider_mites Two-spotted_spider_mite",
    "Tomato___Target_Spot",
    "Tomato___Tomato_Yellow_Leaf_Curl_Virus",
    "Tomato___Tomato_mosaic_virus",
    "Tomato___healthy",
];

pub fn is_healthy(label: &str) -> bool {
    label.contains("healthy")
}

/// Labels eligible for a fallback prediction.
pub fn disease_labels() -> impl Iterator<Item = &'static str> {
    CLASS_NAMES.iter().copied().filter(|l| !is_healthy(l))
}

pub fn label_at(index: usize) -> Option<&'static str> {
    CLASS_NAMES.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirty_eight_distinct_labels() {
        let mut sorted = CLASS_NAMES.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), NUM_CLASSES);
    }

    #[test]
    fn disease_labels_exclude_healthy() {
        let diseases: Vec<_> = disease_labels().collect();
        assert_eq!(diseases.len(), 26);
        assert!(diseases.iter().all(|l| !l.contains("healthy")));
        assert_eq!(diseases[0], "Apple___Apple_scab");
    }

    #[test]
    fn positional_lookup() {
        assert_eq!(label_at(30), Some("Tomato___Late_blight"));
        assert_eq!(label_at(37), Some("Tomato___healthy"));
        assert_eq!(label_at(NUM_CLASSES), None);
    }
}
