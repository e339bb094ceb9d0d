//! REST data model for users, materials and anomaly reports.
//!
//! DESIGN
//! ======
//! The backend schema is authoritative. Legacy field names from the older
//! frontend shape (`nom` / `description` on materials, `prénom` on users)
//! are accepted on read through serde aliases, so records written by either
//! generation decode into the same type.
//!
//! Each record has a matching `*Draft` holding the editable form fields. Drafts
//! keep optional text as plain `String`s (empty means unset) because that is
//! what form inputs bind to; `Resource::payload` normalizes them on submit.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use serde::{Deserialize, Deserializer, Serialize};

use crate::form::Resource;

// =============================================================================
// ENUMERATIONS
// =============================================================================

/// Kind of fleet asset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    Camion,
    Remorque,
    Equipement,
    Outil,
    /// Any value this client does not know about.
    #[default]
    #[serde(other)]
    Autre,
}

impl MaterialKind {
    /// Kinds offered by the material form, in display order.
    pub const ALL: [Self; 4] = [Self::Camion, Self::Remorque, Self::Equipement, Self::Outil];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Camion => "camion",
            Self::Remorque => "remorque",
            Self::Equipement => "equipement",
            Self::Outil => "outil",
            Self::Autre => "autre",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Camion => "Camion",
            Self::Remorque => "Remorque",
            Self::Equipement => "Équipement",
            Self::Outil => "Outil",
            Self::Autre => "Autre",
        }
    }

    /// Parse a `<select>` value. The empty placeholder option yields `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == raw)
    }
}

/// Operational status of a fleet asset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialStatus {
    #[default]
    Disponible,
    Actif,
    Maintenance,
    Retire,
    #[serde(other)]
    Autre,
}

impl MaterialStatus {
    pub const ALL: [Self; 4] = [Self::Disponible, Self::Actif, Self::Maintenance, Self::Retire];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disponible => "disponible",
            Self::Actif => "actif",
            Self::Maintenance => "maintenance",
            Self::Retire => "retire",
            Self::Autre => "autre",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Disponible => "Disponible",
            Self::Actif => "Actif",
            Self::Maintenance => "En maintenance",
            Self::Retire => "Retiré",
            Self::Autre => "Autre",
        }
    }

    /// Parse a `<select>` value, falling back to the server default.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        Self::ALL.into_iter().find(|status| status.as_str() == raw).unwrap_or_default()
    }
}

/// Access level of a staff account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    /// Also any role string this client does not know about.
    #[default]
    #[serde(other)]
    User,
}

impl UserRole {
    pub const ALL: [Self; 2] = [Self::User, Self::Admin];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "Utilisateur",
            Self::Admin => "Administrateur",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw == "admin" { Self::Admin } else { Self::User }
    }
}

/// Nullable backend columns read as the field's default instead of failing
/// the whole list.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// MATERIALS
// =============================================================================

/// A fleet asset (vehicle or equipment) as returned by `/materiels/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: u32,
    #[serde(default, alias = "nom", deserialize_with = "null_as_default")]
    pub identifiant: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub plaque: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub type_materiel: MaterialKind,
    #[serde(default, deserialize_with = "null_as_default")]
    pub statut: MaterialStatus,
    #[serde(default)]
    pub kilometrage: Option<u32>,
    /// Technical inspection timestamp (ISO-8601, time part optional).
    #[serde(default)]
    pub date_controle_technique: Option<String>,
    /// Free-text notes.
    #[serde(default, alias = "description")]
    pub options: Option<String>,
    /// Owning user, if any.
    #[serde(default)]
    pub responsable_id: Option<u32>,
}

impl Material {
    /// Option text used by the signal form's material picker.
    #[must_use]
    pub fn picker_label(&self) -> String {
        format!("{} - {} ({})", self.identifiant, self.type_materiel.as_str(), self.plaque)
    }
}

/// Editable fields of a material.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialDraft {
    pub identifiant: String,
    pub plaque: String,
    pub type_materiel: Option<MaterialKind>,
    pub statut: MaterialStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kilometrage: Option<u32>,
    /// Inspection date as entered in a date input (`YYYY-MM-DD`).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub date_controle_technique: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub options: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsable_id: Option<u32>,
}

/// Wire body for material create/update.
#[derive(Debug, Serialize)]
struct MaterialPayload<'a> {
    identifiant: &'a str,
    plaque: &'a str,
    type_materiel: MaterialKind,
    statut: MaterialStatus,
    kilometrage: Option<u32>,
    date_controle_technique: Option<String>,
    options: Option<&'a str>,
    responsable_id: Option<u32>,
}

/// Date portion (`YYYY-MM-DD`) of a server timestamp, suitable for a date input.
#[must_use]
pub fn date_part(timestamp: &str) -> &str {
    timestamp.split('T').next().unwrap_or(timestamp)
}

/// Expand a bare `YYYY-MM-DD` date into a midnight timestamp.
#[must_use]
pub fn inspection_timestamp(date: &str) -> String {
    let date = date.trim();
    if date.contains('T') { date.to_owned() } else { format!("{date}T00:00:00") }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}

impl Resource for Material {
    type Draft = MaterialDraft;

    const COLLECTION: &'static str = "/materiels/";
    const NOUN: &'static str = "matériel";
    const DELETE_PROMPT: &'static str = "Êtes-vous sûr de vouloir supprimer ce matériel ?";

    fn id(&self) -> u32 {
        self.id
    }

    fn to_draft(&self) -> MaterialDraft {
        MaterialDraft {
            identifiant: self.identifiant.clone(),
            plaque: self.plaque.clone(),
            type_materiel: Some(self.type_materiel),
            statut: self.statut,
            kilometrage: self.kilometrage,
            date_controle_technique: self.date_controle_technique.as_deref().map(date_part).unwrap_or_default().to_owned(),
            options: self.options.clone().unwrap_or_default(),
            responsable_id: self.responsable_id,
        }
    }

    fn validate(draft: &MaterialDraft) -> Result<(), &'static str> {
        if draft.identifiant.trim().is_empty() {
            return Err("L'identifiant ne peut pas être vide");
        }
        if draft.plaque.trim().is_empty() {
            return Err("La plaque ne peut pas être vide");
        }
        if draft.type_materiel.is_none() {
            return Err("Veuillez sélectionner un type de matériel");
        }
        Ok(())
    }

    fn payload(draft: &MaterialDraft) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(MaterialPayload {
            identifiant: draft.identifiant.trim(),
            plaque: draft.plaque.trim(),
            type_materiel: draft.type_materiel.unwrap_or(MaterialKind::Autre),
            statut: draft.statut,
            kilometrage: draft.kilometrage,
            date_controle_technique: non_blank(&draft.date_controle_technique).map(inspection_timestamp),
            options: non_blank(&draft.options),
            responsable_id: draft.responsable_id,
        })
    }
}

// =============================================================================
// SIGNALS
// =============================================================================

/// An anomaly report as returned by `/anomalies/`.
///
/// `titre`, `type_signal`, `priorite` and `statut` only appear on records
/// written by the older report shape; they are displayed when present and
/// never sent back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub id: u32,
    #[serde(default)]
    pub materiel_id: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub date_signalement: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_signal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priorite: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statut: Option<String>,
}

/// Editable fields of an anomaly report. `materiel_id == 0` means unselected.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalDraft {
    pub materiel_id: u32,
    pub description: String,
    pub photo_url: String,
}

#[derive(Debug, Serialize)]
struct SignalPayload<'a> {
    materiel_id: u32,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    photo_url: Option<&'a str>,
}

/// Display label for the material a report points at, by identifier lookup.
#[must_use]
pub fn material_label(materials: &[Material], materiel_id: Option<u32>) -> String {
    let Some(id) = materiel_id else {
        return "-".to_owned();
    };
    materials
        .iter()
        .find(|m| m.id == id)
        .map_or_else(|| format!("ID: {id}"), |m| m.identifiant.clone())
}

impl Resource for Signal {
    type Draft = SignalDraft;

    const COLLECTION: &'static str = "/anomalies/";
    const NOUN: &'static str = "signalement";
    const DELETE_PROMPT: &'static str = "Êtes-vous sûr de vouloir supprimer ce signalement ?";

    fn id(&self) -> u32 {
        self.id
    }

    fn to_draft(&self) -> SignalDraft {
        SignalDraft {
            materiel_id: self.materiel_id.unwrap_or(0),
            description: self.description.clone(),
            photo_url: self.photo_url.clone().unwrap_or_default(),
        }
    }

    fn validate(draft: &SignalDraft) -> Result<(), &'static str> {
        if draft.materiel_id == 0 {
            return Err("Veuillez sélectionner un matériel");
        }
        if draft.description.trim().is_empty() {
            return Err("Veuillez saisir une description");
        }
        Ok(())
    }

    fn payload(draft: &SignalDraft) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(SignalPayload {
            materiel_id: draft.materiel_id,
            description: draft.description.trim(),
            photo_url: non_blank(&draft.photo_url),
        })
    }
}

// =============================================================================
// USERS
// =============================================================================

/// A staff account as returned by `/users/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nom: String,
    #[serde(default, alias = "prénom", deserialize_with = "null_as_default")]
    pub prenom: String,
    #[serde(default, rename = "société")]
    pub societe: Option<String>,
    #[serde(default, rename = "téléphone")]
    pub telephone: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: UserRole,
}

impl User {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.prenom, self.nom).trim().to_owned()
    }
}

/// Editable fields of a staff account.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserDraft {
    pub email: String,
    pub nom: String,
    pub prenom: String,
    #[serde(rename = "société", skip_serializing_if = "String::is_empty")]
    pub societe: String,
    #[serde(rename = "téléphone", skip_serializing_if = "String::is_empty")]
    pub telephone: String,
    pub role: UserRole,
    /// Initial password; only sent when filled in.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub password: String,
}

impl Resource for User {
    type Draft = UserDraft;

    const COLLECTION: &'static str = "/users/";
    const NOUN: &'static str = "utilisateur";
    const DELETE_PROMPT: &'static str = "Êtes-vous sûr de vouloir supprimer cet utilisateur ?";

    fn id(&self) -> u32 {
        self.id
    }

    fn to_draft(&self) -> UserDraft {
        UserDraft {
            email: self.email.clone(),
            nom: self.nom.clone(),
            prenom: self.prenom.clone(),
            societe: self.societe.clone().unwrap_or_default(),
            telephone: self.telephone.clone().unwrap_or_default(),
            role: self.role,
            password: String::new(),
        }
    }

    fn validate(draft: &UserDraft) -> Result<(), &'static str> {
        if draft.email.trim().is_empty() {
            return Err("L'email est obligatoire");
        }
        if draft.nom.trim().is_empty() || draft.prenom.trim().is_empty() {
            return Err("Le nom et le prénom sont obligatoires");
        }
        Ok(())
    }
}

// =============================================================================
// SCALAR ENDPOINTS
// =============================================================================

/// Change marker returned by `/materiels/events`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastUpdate {
    pub last_update: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Totals returned by `/stats/`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub materiels_total: u64,
    pub anomalies_total: u64,
}

/// Row count returned by `/materiels/count`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Count {
    pub count: u64,
}
