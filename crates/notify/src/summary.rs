//! Composition of the new-inscription summary email.

use inscription_db::models::inscription::Inscription;
use serde_json::Value;

/// Subject line of every notification.
pub const SUBJECT: &str = "Nouvelle inscription en ligne";

/// Placeholder shown for a document slot with no reference.
const NON_FOURNI: &str = "Non fourni";

/// Compose the subject and HTML body summarizing a persisted inscription.
pub fn compose(inscription: &Inscription) -> (String, String) {
    let fiche = &inscription.fiche_renseignement;
    let filiere = inscription
        .formulaire_bts_dts
        .as_ref()
        .map(|f| text_field(f, "filiere"))
        .unwrap_or_default();

    let documents = &inscription.documents.0;
    let paiement = &inscription.paiement.0;

    let html = format!(
        "<h2>{SUBJECT}</h2>\n\
         <p><strong>Prénom :</strong> {prenom}</p>\n\
         <p><strong>Nom :</strong> {nom}</p>\n\
         <p><strong>Adresse :</strong> {adresse}</p>\n\
         <p><strong>Filière demandée :</strong> {filiere}</p>\n\
         <p><strong>Mode de paiement :</strong> {mode}</p>\n\
         <p><strong>Référence paiement :</strong> {reference}</p>\n\
         <p><strong>ID inscription :</strong> {id}</p>\n\
         <h3>Documents</h3>\n\
         <ul>\n\
         <li>Diplôme : {diplome}</li>\n\
         <li>CNI : {cni}</li>\n\
         <li>Reçu paiement : {recu}</li>\n\
         </ul>",
        prenom = text_field(fiche, "prenom"),
        nom = text_field(fiche, "nom"),
        adresse = text_field(fiche, "adresse"),
        mode = serde_json::to_value(paiement.mode)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default(),
        reference = paiement.reference,
        id = inscription.id,
        diplome = slot(&documents.diplome_url),
        cni = slot(&documents.carte_identite_url),
        recu = slot(&documents.recu_paiement_url),
    );

    (SUBJECT.to_string(), html)
}

fn text_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn slot(url: &Option<String>) -> &str {
    url.as_deref().unwrap_or(NON_FOURNI)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
