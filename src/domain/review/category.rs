// src/domain/review/category.rs
//
// Review category taxonomy.
// Each variant carries its own scope so the class-targeted/general split
// cannot drift from the list of categories.

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Whether a category is about a specific class or a campus-wide topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryScope {
    /// About a professor, classmate, subject or room of a class; needs a target class
    ClassTargeted,
    /// Campus life; a target class is optional
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ReviewCategory {
    ProfGood,
    ProfBad,
    ProfCrazy,
    ClassBoring,
    ClassRoom,
    StudentAnnoying,
    StudentGenius,
    StudentDumb,
    StudentPsycho,
    StudentFunny,
    SubjectDifficult,
    SubjectEasy,
    SubjectIrrelevant,
    SubjectBoring,
    SubjectImpossibleTest,
    SubjectEasyTest,
    SubjectManyPapers,
    Other,
    GeneralTopics,
    Canteen,
    Robbery,
    BikeParking,
    Gymnasium,
    Spotted,
    PucUrgent,
    DirectoriesVillage,
    Events,
    ParkingLot,
    BlueStands,
    Food,
    InternshipOpps,
    JobOpps,
    ResearchOpps,
    InformaticsWeek,
    Cainf,
    InfDept,
    UgLab,
    DevSuggestion,
}

use CategoryScope::{ClassTargeted, General};

impl ReviewCategory {
    pub const ALL: [ReviewCategory; 38] = [
        ReviewCategory::ProfGood,
        ReviewCategory::ProfBad,
        ReviewCategory::ProfCrazy,
        ReviewCategory::ClassBoring,
        ReviewCategory::ClassRoom,
        ReviewCategory::StudentAnnoying,
        ReviewCategory::StudentGenius,
        ReviewCategory::StudentDumb,
        ReviewCategory::StudentPsycho,
        ReviewCategory::StudentFunny,
        ReviewCategory::SubjectDifficult,
        ReviewCategory::SubjectEasy,
        ReviewCategory::SubjectIrrelevant,
        ReviewCategory::SubjectBoring,
        ReviewCategory::SubjectImpossibleTest,
        ReviewCategory::SubjectEasyTest,
        ReviewCategory::SubjectManyPapers,
        ReviewCategory::Other,
        ReviewCategory::GeneralTopics,
        ReviewCategory::Canteen,
        ReviewCategory::Robbery,
        ReviewCategory::BikeParking,
        ReviewCategory::Gymnasium,
        ReviewCategory::Spotted,
        ReviewCategory::PucUrgent,
        ReviewCategory::DirectoriesVillage,
        ReviewCategory::Events,
        ReviewCategory::ParkingLot,
        ReviewCategory::BlueStands,
        ReviewCategory::Food,
        ReviewCategory::InternshipOpps,
        ReviewCategory::JobOpps,
        ReviewCategory::ResearchOpps,
        ReviewCategory::InformaticsWeek,
        ReviewCategory::Cainf,
        ReviewCategory::InfDept,
        ReviewCategory::UgLab,
        ReviewCategory::DevSuggestion,
    ];

    /// (code, label, scope) for every category
    fn entry(&self) -> (&'static str, &'static str, CategoryScope) {
        match self {
            ReviewCategory::ProfGood => ("PROF_GOOD", "Elogio ao Professor", ClassTargeted),
            ReviewCategory::ProfBad => ("PROF_BAD", "Crítica ao Professor", ClassTargeted),
            ReviewCategory::ProfCrazy => ("PROF_CRAZY", "Professor Maluco", ClassTargeted),
            ReviewCategory::ClassBoring => ("CLASS_BORING", "Turma Chata", ClassTargeted),
            ReviewCategory::ClassRoom => ("CLASS_ROOM", "Sala de Aula da Turma", ClassTargeted),
            ReviewCategory::StudentAnnoying => {
                ("STUDENT_ANNOYING", "Aluno Insuportável", ClassTargeted)
            }
            ReviewCategory::StudentGenius => ("STUDENT_GENIUS", "Aluno Genial", ClassTargeted),
            ReviewCategory::StudentDumb => ("STUDENT_DUMB", "Aluno Burro", ClassTargeted),
            ReviewCategory::StudentPsycho => ("STUDENT_PSYCHO", "Aluno Psicopata", ClassTargeted),
            ReviewCategory::StudentFunny => ("STUDENT_FUNNY", "Aluno Engraçado", ClassTargeted),
            ReviewCategory::SubjectDifficult => {
                ("SUBJECT_DIFFICULT", "Matéria Difícil", ClassTargeted)
            }
            ReviewCategory::SubjectEasy => ("SUBJECT_EASY", "Matéria Fácil", ClassTargeted),
            ReviewCategory::SubjectIrrelevant => {
                ("SUBJECT_IRRELEVANT", "Matéria Nada a Ver", ClassTargeted)
            }
            ReviewCategory::SubjectBoring => ("SUBJECT_BORING", "Matéria Chata", ClassTargeted),
            ReviewCategory::SubjectImpossibleTest => (
                "SUBJECT_IMPOSSIBLE_TEST",
                "Matéria Prova Impossível",
                ClassTargeted,
            ),
            ReviewCategory::SubjectEasyTest => {
                ("SUBJECT_EASY_TEST", "Matéria Prova Fácil", ClassTargeted)
            }
            ReviewCategory::SubjectManyPapers => {
                ("SUBJECT_MANY_PAPERS", "Matéria Muitos Trabalhos", ClassTargeted)
            }
            ReviewCategory::Other => ("OTHER", "Outro (Categoria Indefinida)", ClassTargeted),
            ReviewCategory::GeneralTopics => ("GENERAL_TOPICS", "Assuntos Gerais", General),
            ReviewCategory::Canteen => ("CANTEEN", "Bandejão", General),
            ReviewCategory::Robbery => ("ROBBERY", "Assalto", General),
            ReviewCategory::BikeParking => ("BIKE_PARKING", "Bicicletário", General),
            ReviewCategory::Gymnasium => ("GYMNASIUM", "Ginásio", General),
            ReviewCategory::Spotted => ("SPOTTED", "Spotted PUC", General),
            ReviewCategory::PucUrgent => ("PUC_URGENT", "PUC Urgente", General),
            ReviewCategory::DirectoriesVillage => {
                ("DIRECTORIES_VILLAGE", "Vila dos Diretórios", General)
            }
            ReviewCategory::Events => ("EVENTS", "Eventos", General),
            ReviewCategory::ParkingLot => ("PARKING_LOT", "Estacionamento", General),
            ReviewCategory::BlueStands => ("BLUE_STANDS", "Barraquinhas Azuis", General),
            ReviewCategory::Food => ("FOOD", "Comida", General),
            ReviewCategory::InternshipOpps => {
                ("INTERNSHIP_OPPS", "Oportunidades de Estágio", General)
            }
            ReviewCategory::JobOpps => ("JOB_OPPS", "Oportunidades de Trabalho", General),
            ReviewCategory::ResearchOpps => ("RESEARCH_OPPS", "Oportunidades de Pesquisa", General),
            ReviewCategory::InformaticsWeek => {
                ("INFORMATICS_WEEK", "Semana da Informática", General)
            }
            ReviewCategory::Cainf => ("CAINF", "CAINF", General),
            ReviewCategory::InfDept => ("INF_DEPT", "Departamento de Informática", General),
            ReviewCategory::UgLab => ("UG_LAB", "LAB Grad", General),
            ReviewCategory::DevSuggestion => {
                ("DEV_SUGGESTION", "Sugestão aos Desenvolvedores", General)
            }
        }
    }

    pub fn code(&self) -> &'static str {
        self.entry().0
    }

    pub fn label(&self) -> &'static str {
        self.entry().1
    }

    pub fn scope(&self) -> CategoryScope {
        self.entry().2
    }

    pub fn requires_class(&self) -> bool {
        self.scope() == ClassTargeted
    }
}

impl std::str::FromStr for ReviewCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        ReviewCategory::ALL
            .into_iter()
            .find(|category| category.code() == code)
            .ok_or_else(|| DomainError::InvalidInput(format!("unknown review category '{}'", code)))
    }
}

impl TryFrom<String> for ReviewCategory {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReviewCategory> for String {
    fn from(category: ReviewCategory) -> Self {
        category.code().to_string()
    }
}

impl std::fmt::Display for ReviewCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
