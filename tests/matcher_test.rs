use anyhow::Result;
use pathway_planner::domain::course::Track;
use pathway_planner::domain::model::{AcademicRecord, PathwaySelection};
use pathway_planner::{Grade, PlannerConfig, PlannerEngine, StudentSnapshot, SubjectRecord};

fn engine() -> Result<PlannerEngine> {
    Ok(PlannerEngine::new(PlannerConfig::default())?)
}

fn exam(subject: &str, grade: &str, exam_type: &str) -> AcademicRecord {
    AcademicRecord {
        subject_name: subject.to_string(),
        grade: Some(grade.to_string()),
        score: None,
        exam_type: exam_type.to_string(),
        year: Some(2024),
        term: None,
    }
}

fn health_sciences_student() -> StudentSnapshot {
    let names = ["Biology", "Chemistry", "English Language"];
    StudentSnapshot {
        student_id: "s-100".to_string(),
        subjects: names
            .iter()
            .map(|name| SubjectRecord::new(*name, Some(Grade::A1), 3.0))
            .collect(),
        academic_history: names
            .iter()
            .map(|name| exam(name, "A1", "Secondary School"))
            .collect(),
        ..StudentSnapshot::default()
    }
}

#[test]
fn test_browse_lists_every_overlapping_course() -> Result<()> {
    let engine = engine()?;
    let recs = engine.browse_courses(&health_sciences_student().history_subject_names());

    assert_eq!(recs.polytechnic.len(), 78);
    assert_eq!(recs.ite.len(), 7);
    assert_eq!(recs.ite[0].course.name, "Food & Beverage Operations");
    assert!(recs
        .polytechnic
        .windows(2)
        .all(|w| w[0].score_percent >= w[1].score_percent));
    Ok(())
}

#[test]
fn test_pathway_shortlist_for_strong_student() -> Result<()> {
    let engine = engine()?;
    let recs = engine.pathway_courses(&health_sciences_student(), false);

    assert_eq!(recs.polytechnic.len(), 10);
    assert!(recs.polytechnic.iter().all(|m| m.score_percent == 100.0));
    assert_eq!(recs.polytechnic[0].course.code.as_deref(), Some("S17"));
    assert!(recs.ite.is_empty());
    Ok(())
}

#[test]
fn test_pathway_shortlist_reads_history_not_enrolment() -> Result<()> {
    let engine = engine()?;
    let mut student = health_sciences_student();
    student.academic_history.clear();

    // Current subjects alone do not produce a shortlist.
    assert_eq!(engine.pathway_courses(&student, false).total(), 0);

    student.academic_history = vec![
        exam("Biology", "A1", "Secondary School"),
        exam("Mathematics", "F9", "ITE"),
        exam("Physics", "F9", "ITE"),
        exam("Principles of Accounts", "F9", "ITE"),
    ];
    // Secondary School only: Biology A1, polytechnic track.
    let recs = engine.pathway_courses(&student, false);
    assert!(!recs.polytechnic.is_empty());
    assert!(recs.ite.is_empty());

    // Every record: average 7.0 closes polytechnic and opens ITE.
    let recs = engine.pathway_courses(&student, true);
    assert!(recs.polytechnic.is_empty());
    assert_eq!(recs.ite[0].course.name, "Mechatronics Engineering");
    assert_eq!(recs.ite[0].score_percent, 100.0);
    Ok(())
}

#[test]
fn test_institution_lookup() -> Result<()> {
    let engine = engine()?;
    let courses = engine.institution_courses(Track::Polytechnic, "Singapore Polytechnic (SP)");
    assert_eq!(courses.len(), 26);
    assert_eq!(courses[0].name, "Accountancy");

    // ITE rows carry no institution tags.
    assert!(engine
        .institution_courses(Track::Ite, "ITE College Central (ITE)")
        .is_empty());
    Ok(())
}

#[test]
fn test_careers_follow_selected_pathway() -> Result<()> {
    let engine = engine()?;
    let snapshot = StudentSnapshot {
        pathway: Some(PathwaySelection {
            pathway_type: Some("Polytechnic".to_string()),
            course_name: Some("Computer Engineering".to_string()),
            ..PathwaySelection::default()
        }),
        ..health_sciences_student()
    };

    let careers = engine.careers(&snapshot);
    assert_eq!(careers[0].title, "Software Engineer");
    assert_eq!(careers[0].match_percent, 95);
    assert!(careers.iter().all(|c| c.salary.is_some()));
    Ok(())
}

#[test]
fn test_careers_fall_back_to_history() -> Result<()> {
    let engine = engine()?;
    let history = vec![
        AcademicRecord {
            subject_name: "Biology".to_string(),
            grade: Some("A".to_string()),
            score: Some(88.0),
            exam_type: "End-of-Year".to_string(),
            year: Some(2024),
            term: None,
        },
        AcademicRecord {
            subject_name: "Biology".to_string(),
            grade: Some("B".to_string()),
            score: None,
            exam_type: "Mid-Year".to_string(),
            year: Some(2024),
            term: Some(1),
        },
        AcademicRecord {
            subject_name: "English".to_string(),
            grade: Some("B".to_string()),
            score: None,
            exam_type: "End-of-Year".to_string(),
            year: Some(2024),
            term: None,
        },
    ];
    let snapshot = StudentSnapshot {
        academic_history: history,
        ..health_sciences_student()
    };

    // math 70, science 80, language 75, computing 0
    let careers = engine.careers(&snapshot);
    let titles: Vec<&str> = careers.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Healthcare Professional", "Engineer", "Business Analyst"]);
    let percents: Vec<u32> = careers.iter().map(|c| c.match_percent).collect();
    assert_eq!(percents, vec![77, 75, 75]);
    Ok(())
}
